//! Summary mode: keep one up-to-date overview comment per pull request.

use super::RunOutcome;
use crate::config::RunContext;
use crate::github::error::HeraldError;
use crate::github::gateway::{CommentGateway, PullRequestGateway};
use crate::github::reconciler::CommentReconciler;
use crate::github::resolver::PullRequestResolver;
use crate::summary::{SUMMARY_MARKER, format_summary};

/// Resolves the pull request for the push and upserts its summary comment.
///
/// # Errors
///
/// Propagates every gateway failure; nothing is written if any fetch fails.
pub fn refresh_summary<P, C>(
    pulls: &P,
    comments: &C,
    context: &RunContext,
) -> Result<RunOutcome, HeraldError>
where
    P: PullRequestGateway,
    C: CommentGateway,
{
    let resolved = PullRequestResolver::new(pulls).resolve(
        context.explicit_pr,
        context.head_sha.as_ref(),
        context.branch.as_deref(),
    )?;
    let Some(number) = resolved else {
        return Ok(RunOutcome::Skipped);
    };

    let snapshot = pulls.pull_request(number)?;
    let commits = pulls.pull_request_commits(number)?;
    let files = pulls.pull_request_files(number)?;
    tracing::info!(
        "summarising pull request {number}: {} commits, {} files",
        commits.len(),
        files.len()
    );

    let body = format_summary(&snapshot, &commits, &files);
    let upsert = CommentReconciler::new(comments, SUMMARY_MARKER).upsert(number, &body)?;
    Ok(RunOutcome::from_upsert(number, upsert))
}

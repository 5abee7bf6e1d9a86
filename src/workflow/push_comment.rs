//! Push mode: refresh a short note listing the commits of the latest push.

use super::RunOutcome;
use crate::config::RunContext;
use crate::github::error::HeraldError;
use crate::github::gateway::{CommentGateway, PullRequestGateway};
use crate::github::locator::CommitSha;
use crate::github::models::CommitSummary;
use crate::github::reconciler::CommentReconciler;
use crate::github::resolver::PullRequestResolver;
use crate::summary::{PUSH_MARKER, format_push_note};

const UNKNOWN_BRANCH: &str = "?";

/// Resolves the pull request for the push and upserts its push note.
///
/// A failed commit comparison only removes the commit list from the note.
///
/// # Errors
///
/// Returns [`HeraldError::Configuration`] without a head SHA and propagates
/// resolution and comment failures.
pub fn announce_push<P, C>(
    pulls: &P,
    comments: &C,
    context: &RunContext,
) -> Result<RunOutcome, HeraldError>
where
    P: PullRequestGateway,
    C: CommentGateway,
{
    let head = context
        .head_sha
        .as_ref()
        .ok_or_else(|| HeraldError::Configuration {
            message: "push mode requires the head commit SHA (set GITHUB_SHA)".to_owned(),
        })?;

    let resolved = PullRequestResolver::new(pulls).resolve(
        context.explicit_pr,
        Some(head),
        context.branch.as_deref(),
    )?;
    let Some(number) = resolved else {
        return Ok(RunOutcome::Skipped);
    };

    let commits = pushed_commits(pulls, context.before_sha.as_ref(), head);
    let branch = context
        .branch
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_BRANCH);
    let body = format_push_note(branch, head, &commits);

    let upsert = CommentReconciler::new(comments, PUSH_MARKER).upsert(number, &body)?;
    Ok(RunOutcome::from_upsert(number, upsert))
}

fn pushed_commits<P: PullRequestGateway>(
    pulls: &P,
    before: Option<&CommitSha>,
    head: &CommitSha,
) -> Vec<CommitSummary> {
    let Some(base) = before.filter(|base| *base != head) else {
        return Vec::new();
    };

    pulls.compare_commits(base, head).unwrap_or_else(|error| {
        tracing::warn!(
            "could not compare {}...{}; omitting commit list: {error}",
            base.short(),
            head.short()
        );
        Vec::new()
    })
}

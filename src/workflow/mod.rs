//! End-to-end runs: resolve the pull request, render, and upsert.
//!
//! The flows are generic over the gateway traits so they can be driven by
//! mocks; [`run`] wires them to the REST gateway.

use std::fmt;

use crate::config::{RunContext, RunMode};
use crate::github::error::HeraldError;
use crate::github::gateway::RestGateway;
use crate::github::reconciler::UpsertOutcome;
use crate::github::transport::ReqwestTransport;
use crate::github::{ApiClient, PullRequestNumber};

mod push_comment;
mod summary_comment;

pub use push_comment::announce_push;
pub use summary_comment::refresh_summary;

/// Line printed when a push has no open pull request.
pub const SKIP_MESSAGE: &str = "No open pull request found for this branch or commit; skipping.";

/// Result of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// No open pull request matched; nothing was written.
    Skipped,
    /// A new managed comment was created.
    Created {
        /// Pull request that received the comment.
        pull_request: PullRequestNumber,
        /// Identifier of the new comment.
        comment_id: u64,
    },
    /// The existing managed comment was replaced.
    Updated {
        /// Pull request that owns the comment.
        pull_request: PullRequestNumber,
        /// Identifier of the replaced comment.
        comment_id: u64,
    },
}

impl RunOutcome {
    pub(crate) const fn from_upsert(pull_request: PullRequestNumber, upsert: UpsertOutcome) -> Self {
        match upsert {
            UpsertOutcome::Created { comment_id } => Self::Created {
                pull_request,
                comment_id,
            },
            UpsertOutcome::Updated { comment_id } => Self::Updated {
                pull_request,
                comment_id,
            },
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => formatter.write_str(SKIP_MESSAGE),
            Self::Created {
                pull_request,
                comment_id,
            } => write!(
                formatter,
                "Created comment {comment_id} on pull request {pull_request}"
            ),
            Self::Updated {
                pull_request,
                comment_id,
            } => write!(
                formatter,
                "Updated comment {comment_id} on pull request {pull_request}"
            ),
        }
    }
}

/// Runs the flow selected by `context.mode` against the GitHub REST API.
///
/// # Errors
///
/// Returns any unrecovered [`HeraldError`]; a missing pull request is
/// reported as [`RunOutcome::Skipped`] instead.
pub fn run(context: &RunContext) -> Result<RunOutcome, HeraldError> {
    let transport = ReqwestTransport::new(&context.token, &context.api_base, context.timeout)?;
    let gateway = RestGateway::new(
        ApiClient::new(transport, context.retry),
        context.repository.clone(),
    );
    tracing::info!(
        "running {} flow for {}",
        context.mode,
        gateway.repository()
    );

    match context.mode {
        RunMode::Summary => refresh_summary(&gateway, &gateway, context),
        RunMode::Push => announce_push(&gateway, &gateway, context),
    }
}

#[cfg(test)]
mod tests;

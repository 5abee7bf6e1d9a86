//! Idempotent create-or-update of a marker-tagged pull request comment.
//!
//! Each managed comment carries a hidden marker. The reconciler lists the
//! pull request's comments, takes the newest one carrying the marker, and
//! replaces its body. Only when no such comment exists is a new one created.
//! Older duplicates left behind by racing runs are never touched.

use super::error::HeraldError;
use super::gateway::CommentGateway;
use super::locator::PullRequestNumber;
use super::models::IssueComment;

/// Returns the newest item matching `predicate`.
///
/// `items` must be in creation order, oldest first, as GitHub lists them.
///
/// # Example
///
/// ```
/// use pr_herald::github::reconciler::find_newest_matching;
///
/// let bodies = ["tagged one", "plain", "tagged two"];
/// let newest = find_newest_matching(&bodies, |body| body.starts_with("tagged"));
/// assert_eq!(newest, Some(&"tagged two"));
/// ```
pub fn find_newest_matching<I>(items: &[I], predicate: impl Fn(&I) -> bool) -> Option<&I> {
    items.iter().rev().find(|item| predicate(item))
}

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No managed comment existed, so one was created.
    Created {
        /// Identifier of the new comment.
        comment_id: u64,
    },
    /// The newest managed comment was replaced in full.
    Updated {
        /// Identifier of the replaced comment.
        comment_id: u64,
    },
}

impl UpsertOutcome {
    /// Identifier of the comment that now carries the body.
    #[must_use]
    pub const fn comment_id(self) -> u64 {
        match self {
            Self::Created { comment_id } | Self::Updated { comment_id } => comment_id,
        }
    }
}

/// Keeps exactly one managed comment per pull request and marker.
#[derive(Debug, Clone)]
pub struct CommentReconciler<'gateway, G> {
    gateway: &'gateway G,
    marker: &'static str,
}

impl<'gateway, G: CommentGateway> CommentReconciler<'gateway, G> {
    /// Creates a reconciler for comments tagged with `marker`.
    #[must_use]
    pub const fn new(gateway: &'gateway G, marker: &'static str) -> Self {
        Self { gateway, marker }
    }

    /// Writes `body` to the managed comment on `number`.
    ///
    /// The marker is prepended when `body` lacks it so the next run can
    /// find the comment again.
    ///
    /// # Errors
    ///
    /// Propagates listing, create, and update failures from the gateway.
    pub fn upsert(
        &self,
        number: PullRequestNumber,
        body: &str,
    ) -> Result<UpsertOutcome, HeraldError> {
        let tagged = if body.contains(self.marker) {
            body.to_owned()
        } else {
            format!("{}\n{body}", self.marker)
        };

        let comments = self.gateway.issue_comments(number)?;
        let existing =
            find_newest_matching(&comments, |comment: &IssueComment| comment.has_marker(self.marker));

        if let Some(comment) = existing {
            let updated = self.gateway.update_comment(comment.id, &tagged)?;
            tracing::info!(
                "updated comment {} by {} on pull request {number}",
                updated.id,
                comment.author.as_deref().unwrap_or("unknown author")
            );
            return Ok(UpsertOutcome::Updated {
                comment_id: updated.id,
            });
        }

        let created = self.gateway.create_comment(number, &tagged)?;
        tracing::info!("created comment {} on pull request {number}", created.id);
        Ok(UpsertOutcome::Created {
            comment_id: created.id,
        })
    }
}

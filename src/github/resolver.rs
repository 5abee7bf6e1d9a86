//! Maps a push (head SHA and branch) to the open pull request it belongs to.

use super::error::HeraldError;
use super::gateway::PullRequestGateway;
use super::locator::{CommitSha, PullRequestNumber};
use super::models::OpenPullRequest;

/// Picks the pull request a push belongs to.
///
/// A pull request whose head SHA equals `head_sha` wins over any branch
/// match. Otherwise the first pull request whose head branch equals
/// `branch` is returned. Listing order breaks ties in both passes.
///
/// # Example
///
/// ```
/// use pr_herald::github::OpenPullRequest;
/// use pr_herald::github::resolver::select_pull_request;
///
/// let open = vec![OpenPullRequest {
///     number: 4,
///     head_sha: None,
///     head_ref: Some("topic".to_owned()),
/// }];
/// let chosen = select_pull_request(&open, None, Some("topic"));
/// assert_eq!(chosen.map(|pull| pull.number), Some(4));
/// ```
#[must_use]
pub fn select_pull_request<'list>(
    open: &'list [OpenPullRequest],
    head_sha: Option<&CommitSha>,
    branch: Option<&str>,
) -> Option<&'list OpenPullRequest> {
    let by_sha = head_sha.and_then(|sha| {
        open.iter()
            .find(|pull| {
                pull.head_sha
                    .as_deref()
                    .is_some_and(|head| head.eq_ignore_ascii_case(sha.as_str()))
            })
    });
    by_sha.or_else(|| {
        let wanted = branch.filter(|name| !name.is_empty())?;
        open.iter()
            .find(|pull| pull.head_ref.as_deref() == Some(wanted))
    })
}

/// Resolves the target pull request for a run.
#[derive(Debug, Clone)]
pub struct PullRequestResolver<'gateway, G> {
    gateway: &'gateway G,
}

impl<'gateway, G: PullRequestGateway> PullRequestResolver<'gateway, G> {
    /// Creates a resolver that lists pull requests through `gateway`.
    #[must_use]
    pub const fn new(gateway: &'gateway G) -> Self {
        Self { gateway }
    }

    /// Returns the pull request to comment on, or `None` when the push has
    /// none.
    ///
    /// An explicit number is trusted without an API call. Otherwise every
    /// open pull request is listed and matched by SHA, then by branch.
    ///
    /// # Errors
    ///
    /// Propagates listing failures from the gateway.
    pub fn resolve(
        &self,
        explicit: Option<PullRequestNumber>,
        head_sha: Option<&CommitSha>,
        branch: Option<&str>,
    ) -> Result<Option<PullRequestNumber>, HeraldError> {
        if let Some(number) = explicit {
            tracing::info!("using explicitly configured pull request {number}");
            return Ok(Some(number));
        }

        if head_sha.is_none() && branch.is_none_or(str::is_empty) {
            tracing::info!("no commit or branch to match against open pull requests");
            return Ok(None);
        }

        let open = self.gateway.open_pull_requests()?;
        let Some(chosen) = select_pull_request(&open, head_sha, branch) else {
            tracing::info!(
                "none of {} open pull requests matches this push",
                open.len()
            );
            return Ok(None);
        };

        let number = PullRequestNumber::new(chosen.number)?;
        tracing::info!("matched push to pull request {number}");
        Ok(Some(number))
    }
}

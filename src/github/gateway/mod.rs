//! Gateways for the GitHub endpoints the comment flows depend on.
//!
//! The traits let the resolver, reconciler, and flows be tested with mocks
//! while [`RestGateway`] performs real requests through [`ApiClient`].

use http::Method;
use serde_json::json;

use crate::github::client::ApiClient;
use crate::github::error::HeraldError;
use crate::github::locator::{CommitSha, PullRequestNumber, RepositoryRef};
use crate::github::models::{
    ApiComment, ApiCommit, ApiComparison, ApiFile, ApiPullRequest, ApiPullRequestListing,
    CommitSummary, FileChange, IssueComment, OpenPullRequest, PullRequestSnapshot,
};
use crate::github::transport::Transport;

/// Read access to pull requests and their commits and files.
#[cfg_attr(test, mockall::automock)]
pub trait PullRequestGateway {
    /// List every open pull request in the repository.
    fn open_pull_requests(&self) -> Result<Vec<OpenPullRequest>, HeraldError>;

    /// Fetch the pull request metadata.
    fn pull_request(&self, number: PullRequestNumber) -> Result<PullRequestSnapshot, HeraldError>;

    /// Fetch the pull request's commits, oldest first.
    fn pull_request_commits(
        &self,
        number: PullRequestNumber,
    ) -> Result<Vec<CommitSummary>, HeraldError>;

    /// Fetch the files changed by the pull request in listing order.
    fn pull_request_files(&self, number: PullRequestNumber)
    -> Result<Vec<FileChange>, HeraldError>;

    /// List the commits reachable from `head` but not from `base`.
    fn compare_commits(
        &self,
        base: &CommitSha,
        head: &CommitSha,
    ) -> Result<Vec<CommitSummary>, HeraldError>;
}

/// Read and write access to issue-style pull request comments.
#[cfg_attr(test, mockall::automock)]
pub trait CommentGateway {
    /// List every comment on the pull request, oldest first.
    fn issue_comments(&self, number: PullRequestNumber) -> Result<Vec<IssueComment>, HeraldError>;

    /// Create a new comment.
    fn create_comment(
        &self,
        number: PullRequestNumber,
        body: &str,
    ) -> Result<IssueComment, HeraldError>;

    /// Replace the body of an existing comment.
    fn update_comment(&self, comment_id: u64, body: &str) -> Result<IssueComment, HeraldError>;
}

/// REST implementation bound to a single repository.
#[derive(Debug, Clone)]
pub struct RestGateway<T> {
    client: ApiClient<T>,
    repository: RepositoryRef,
}

impl<T: Transport> RestGateway<T> {
    /// Creates a gateway for `repository`.
    #[must_use]
    pub const fn new(client: ApiClient<T>, repository: RepositoryRef) -> Self {
        Self { client, repository }
    }

    /// Repository this gateway talks to.
    #[must_use]
    pub const fn repository(&self) -> &RepositoryRef {
        &self.repository
    }

    fn collect_pages<Api, Domain>(&self, path: &str) -> Result<Vec<Domain>, HeraldError>
    where
        Api: serde::de::DeserializeOwned + Into<Domain>,
    {
        self.client
            .pages::<Api>(path)
            .map(|item| item.map(Into::into))
            .collect()
    }
}

impl<T: Transport> PullRequestGateway for RestGateway<T> {
    fn open_pull_requests(&self) -> Result<Vec<OpenPullRequest>, HeraldError> {
        self.collect_pages::<ApiPullRequestListing, _>(&self.repository.open_pulls_path())
    }

    fn pull_request(&self, number: PullRequestNumber) -> Result<PullRequestSnapshot, HeraldError> {
        self.client
            .get::<ApiPullRequest>(&self.repository.pull_request_path(number))
            .map(Into::into)
    }

    fn pull_request_commits(
        &self,
        number: PullRequestNumber,
    ) -> Result<Vec<CommitSummary>, HeraldError> {
        self.collect_pages::<ApiCommit, _>(&self.repository.pull_request_commits_path(number))
    }

    fn pull_request_files(
        &self,
        number: PullRequestNumber,
    ) -> Result<Vec<FileChange>, HeraldError> {
        self.collect_pages::<ApiFile, _>(&self.repository.pull_request_files_path(number))
    }

    fn compare_commits(
        &self,
        base: &CommitSha,
        head: &CommitSha,
    ) -> Result<Vec<CommitSummary>, HeraldError> {
        self.client
            .get::<ApiComparison>(&self.repository.compare_path(base, head))
            .map(|comparison| comparison.commits.into_iter().map(Into::into).collect())
    }
}

impl<T: Transport> CommentGateway for RestGateway<T> {
    fn issue_comments(&self, number: PullRequestNumber) -> Result<Vec<IssueComment>, HeraldError> {
        self.collect_pages::<ApiComment, _>(&self.repository.comments_path(number))
    }

    fn create_comment(
        &self,
        number: PullRequestNumber,
        body: &str,
    ) -> Result<IssueComment, HeraldError> {
        self.client
            .send::<ApiComment>(
                Method::POST,
                &self.repository.comments_path(number),
                &json!({ "body": body }),
            )
            .map(Into::into)
    }

    fn update_comment(&self, comment_id: u64, body: &str) -> Result<IssueComment, HeraldError> {
        self.client
            .send::<ApiComment>(
                Method::PATCH,
                &self.repository.comment_path(comment_id),
                &json!({ "body": body }),
            )
            .map(Into::into)
    }
}

//! GitHub REST access for the comment flows.
//!
//! Layers, leaves first: a [`Transport`] performs single HTTP exchanges,
//! [`ApiClient`] adds retry classification and backoff, [`Pages`] walks
//! paged collections, and [`RestGateway`] exposes the typed endpoints the
//! [`PullRequestResolver`] and [`CommentReconciler`] build on.

pub mod client;
pub mod error;
pub mod gateway;
mod http_utils;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod reconciler;
pub mod resolver;
pub mod transport;

pub use client::ApiClient;
pub use error::HeraldError;
pub use gateway::{CommentGateway, PullRequestGateway, RestGateway};
pub use locator::{
    CommitSha, PersonalAccessToken, PullRequestNumber, RepositoryName, RepositoryOwner,
    RepositoryRef,
};
pub use models::{
    CommitSummary, FileChange, FileStatus, IssueComment, OpenPullRequest, PullRequestSnapshot,
};
pub use pagination::Pages;
pub use reconciler::{CommentReconciler, UpsertOutcome};
pub use resolver::PullRequestResolver;
pub use transport::{ReqwestTransport, RetryPolicy, Transport};

#[cfg(test)]
pub use gateway::{MockCommentGateway, MockPullRequestGateway};

#[cfg(test)]
mod tests;

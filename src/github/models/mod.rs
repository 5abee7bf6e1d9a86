//! Data models representing pull request metadata, commits, files, and
//! comments.
//!
//! Types prefixed with `Api` are internal deserialisation targets that
//! convert into public domain types. Missing optional fields fall back to
//! fixed placeholders so that rendering never has to deal with absence.

use std::fmt;

use serde::Deserialize;

use super::locator::short_sha;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Placeholder shown for a commit whose message is empty.
pub const NO_MESSAGE: &str = "(no message)";

/// Open pull request as returned by the listing endpoint.
///
/// Only the fields needed to match a push against a pull request are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenPullRequest {
    /// Pull request number.
    pub number: u64,
    /// Commit SHA at the head of the source branch.
    pub head_sha: Option<String>,
    /// Source branch name.
    pub head_ref: Option<String>,
}

/// Read-only projection of a pull request, fetched fresh each run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestSnapshot {
    /// Pull request number.
    pub number: u64,
    /// Title, `(no title)` when absent.
    pub title: String,
    /// Author login, `unknown` when absent.
    pub author: String,
    /// Source branch name, `?` when absent.
    pub head_ref: String,
    /// Target branch name, `?` when absent.
    pub base_ref: String,
    /// Lines added across the pull request.
    pub additions: u64,
    /// Lines deleted across the pull request.
    pub deletions: u64,
    /// Number of changed files reported by GitHub, if present.
    pub changed_files: Option<u64>,
    /// Free-text description, empty when absent.
    pub body: String,
}

impl PullRequestSnapshot {
    /// Combined additions and deletions.
    #[must_use]
    pub const fn total_changes(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }
}

/// A commit with its full hash and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    /// Full commit hash.
    pub sha: String,
    /// Complete commit message.
    pub message: String,
}

impl CommitSummary {
    /// Seven character abbreviation of the hash.
    #[must_use]
    pub fn short_sha(&self) -> &str {
        short_sha(&self.sha)
    }

    /// First line of the message, or [`NO_MESSAGE`] when it is blank.
    #[must_use]
    pub fn title(&self) -> &str {
        self.message
            .lines()
            .next()
            .filter(|line| !line.trim().is_empty())
            .unwrap_or(NO_MESSAGE)
    }
}

/// Change status of a file in a pull request diff.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum FileStatus {
    /// The file was created.
    Added,
    /// The file content changed.
    Modified,
    /// The file was deleted.
    Removed,
    /// The file moved to a new path.
    Renamed,
    /// Any other status GitHub reports (`copied`, `changed`, ...).
    Other(String),
}

impl From<String> for FileStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "added" => Self::Added,
            "modified" => Self::Modified,
            "removed" => Self::Removed,
            "renamed" => Self::Renamed,
            _ => Self::Other(value),
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
            Self::Renamed => "renamed",
            Self::Other(other) => other.as_str(),
        };
        formatter.write_str(label)
    }
}

/// A file touched by a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Path of the file after the change.
    pub path: String,
    /// Change status.
    pub status: FileStatus,
    /// Lines added.
    pub additions: u64,
    /// Lines deleted.
    pub deletions: u64,
}

impl FileChange {
    /// Combined additions and deletions used for ranking.
    #[must_use]
    pub const fn changes(&self) -> u64 {
        self.additions.saturating_add(self.deletions)
    }
}

/// Issue-style comment on a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueComment {
    /// Comment identifier.
    pub id: u64,
    /// Comment body.
    pub body: Option<String>,
    /// Author login.
    pub author: Option<String>,
}

impl IssueComment {
    /// Returns true when the body contains `marker`.
    #[must_use]
    pub fn has_marker(&self, marker: &str) -> bool {
        self.body.as_deref().is_some_and(|body| body.contains(marker))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiBranch {
    #[serde(rename = "ref")]
    pub(super) ref_name: Option<String>,
    pub(super) sha: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequestListing {
    pub(super) number: u64,
    pub(super) head: Option<ApiBranch>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiPullRequest {
    pub(super) number: u64,
    pub(super) title: Option<String>,
    pub(super) user: Option<ApiUser>,
    pub(super) head: Option<ApiBranch>,
    pub(super) base: Option<ApiBranch>,
    pub(super) additions: Option<u64>,
    pub(super) deletions: Option<u64>,
    pub(super) changed_files: Option<u64>,
    pub(super) body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommitDetail {
    pub(super) message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiCommit {
    pub(super) sha: Option<String>,
    pub(super) commit: Option<ApiCommitDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiComparison {
    #[serde(default)]
    pub(super) commits: Vec<ApiCommit>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiFile {
    pub(super) filename: Option<String>,
    pub(super) status: Option<FileStatus>,
    pub(super) additions: Option<u64>,
    pub(super) deletions: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiComment {
    pub(super) id: u64,
    pub(super) body: Option<String>,
    pub(super) user: Option<ApiUser>,
}

impl From<ApiPullRequestListing> for OpenPullRequest {
    fn from(value: ApiPullRequestListing) -> Self {
        let (head_ref, head_sha) = value
            .head
            .map_or((None, None), |head| (head.ref_name, head.sha));
        Self {
            number: value.number,
            head_sha,
            head_ref,
        }
    }
}

fn branch_name(branch: Option<ApiBranch>) -> String {
    branch
        .and_then(|inner| inner.ref_name)
        .unwrap_or_else(|| "?".to_owned())
}

impl From<ApiPullRequest> for PullRequestSnapshot {
    fn from(value: ApiPullRequest) -> Self {
        Self {
            number: value.number,
            title: value.title.unwrap_or_else(|| "(no title)".to_owned()),
            author: value
                .user
                .and_then(|user| user.login)
                .unwrap_or_else(|| "unknown".to_owned()),
            head_ref: branch_name(value.head),
            base_ref: branch_name(value.base),
            additions: value.additions.unwrap_or(0),
            deletions: value.deletions.unwrap_or(0),
            changed_files: value.changed_files,
            body: value.body.unwrap_or_default(),
        }
    }
}

impl From<ApiCommit> for CommitSummary {
    fn from(value: ApiCommit) -> Self {
        Self {
            sha: value.sha.unwrap_or_default(),
            message: value
                .commit
                .and_then(|detail| detail.message)
                .unwrap_or_default(),
        }
    }
}

impl From<ApiFile> for FileChange {
    fn from(value: ApiFile) -> Self {
        Self {
            path: value.filename.unwrap_or_default(),
            status: value
                .status
                .unwrap_or_else(|| FileStatus::Other(String::new())),
            additions: value.additions.unwrap_or(0),
            deletions: value.deletions.unwrap_or(0),
        }
    }
}

impl From<ApiComment> for IssueComment {
    fn from(value: ApiComment) -> Self {
        Self {
            id: value.id,
            body: value.body,
            author: value.user.and_then(|user| user.login),
        }
    }
}

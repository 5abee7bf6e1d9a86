//! Test helpers for constructing model fixtures.
//!
//! # Examples
//!
//! ```
//! use pr_herald::github::models::test_support::{commit, file_change, snapshot};
//!
//! let commit = commit(1, "Fix the parser");
//! assert_eq!(commit.title(), "Fix the parser");
//!
//! let file = file_change("src/lib.rs", 10, 2);
//! assert_eq!(file.changes(), 12);
//!
//! let pr = snapshot(7, 300, 50);
//! assert_eq!(pr.total_changes(), 350);
//! ```

use super::{CommitSummary, FileChange, FileStatus, IssueComment, PullRequestSnapshot};

/// Builds a 40 character hash whose prefix encodes `index`.
#[must_use]
pub fn sha_for(index: u64) -> String {
    format!("{index:07x}{}", "0".repeat(33))
}

/// Constructs a commit whose abbreviated hash is `index` in hexadecimal.
#[must_use]
pub fn commit(index: u64, message: &str) -> CommitSummary {
    CommitSummary {
        sha: sha_for(index),
        message: message.to_owned(),
    }
}

/// Constructs a modified file with the given line counts.
#[must_use]
pub fn file_change(path: &str, additions: u64, deletions: u64) -> FileChange {
    FileChange {
        path: path.to_owned(),
        status: FileStatus::Modified,
        additions,
        deletions,
    }
}

/// Constructs a comment with a body.
#[must_use]
pub fn comment(id: u64, body: &str) -> IssueComment {
    IssueComment {
        id,
        body: Some(body.to_owned()),
        author: Some("github-actions[bot]".to_owned()),
    }
}

/// Constructs a snapshot with fixed title, author, and branches.
#[must_use]
pub fn snapshot(number: u64, additions: u64, deletions: u64) -> PullRequestSnapshot {
    PullRequestSnapshot {
        number,
        title: "Improve retries".to_owned(),
        author: "octocat".to_owned(),
        head_ref: "feature/retries".to_owned(),
        base_ref: "main".to_owned(),
        additions,
        deletions,
        changed_files: None,
        body: String::new(),
    }
}

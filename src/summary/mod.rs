//! Deterministic rendering of pull request comment bodies.
//!
//! Every function here is pure: identical inputs produce byte-identical
//! output, so a refreshed comment only changes when the pull request does.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::github::{CommitSummary, FileChange, PullRequestSnapshot};

mod push_note;

pub use push_note::{PUSH_MARKER, format_push_note};

/// Hidden marker identifying the managed summary comment.
pub const SUMMARY_MARKER: &str = "<!-- pr-summary-bot -->";

/// Maximum entries shown in the commit and file sections.
pub const SECTION_LIMIT: usize = 10;

const FOOTER: &str = "_I\u{2019}ll update this comment when new commits are pushed._";

/// Size band derived from the total lines changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeLabel {
    /// Up to 200 lines.
    Small,
    /// 201 to 500 lines.
    Medium,
    /// 501 to 1000 lines.
    Large,
    /// More than 1000 lines.
    Huge,
}

impl SizeLabel {
    /// Classifies `additions + deletions`.
    ///
    /// # Example
    ///
    /// ```
    /// use pr_herald::summary::SizeLabel;
    ///
    /// assert_eq!(SizeLabel::from_total(200), SizeLabel::Small);
    /// assert_eq!(SizeLabel::from_total(201), SizeLabel::Medium);
    /// ```
    #[must_use]
    pub const fn from_total(total: u64) -> Self {
        match total {
            0..=200 => Self::Small,
            201..=500 => Self::Medium,
            501..=1000 => Self::Large,
            _ => Self::Huge,
        }
    }

    /// Lowercase label shown in the scope line.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Huge => "huge",
        }
    }

    /// Coloured square shown next to the label.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Small => "🟩",
            Self::Medium => "🟨",
            Self::Large => "🟧",
            Self::Huge => "🟥",
        }
    }
}

/// Returns the last [`SECTION_LIMIT`] commits, newest first.
#[must_use]
pub fn recent_commits(commits: &[CommitSummary]) -> Vec<&CommitSummary> {
    commits.iter().rev().take(SECTION_LIMIT).collect()
}

/// Returns the [`SECTION_LIMIT`] files with the most changed lines.
///
/// The sort is stable so equal counts keep their listing order.
#[must_use]
pub fn top_files(files: &[FileChange]) -> Vec<&FileChange> {
    let mut ranked: Vec<&FileChange> = files.iter().collect();
    ranked.sort_by_key(|file| Reverse(file.changes()));
    ranked.truncate(SECTION_LIMIT);
    ranked
}

/// Collects `#<digits>` references from free text, sorted as strings.
///
/// Surrounding punctuation such as `(#4)` or `#7,` is ignored.
///
/// # Example
///
/// ```
/// use pr_herald::summary::linked_issues;
///
/// let issues = linked_issues("fixes #12 and relates to #7, see #12");
/// assert_eq!(issues, vec!["#12", "#7"]);
/// ```
#[must_use]
pub fn linked_issues(body: &str) -> Vec<String> {
    let found: BTreeSet<&str> = body
        .split_whitespace()
        .map(|token| {
            token
                .trim_start_matches('(')
                .trim_end_matches([',', '.', ';', ':', '!', '?', ')'])
        })
        .filter(|token| is_issue_reference(token))
        .collect();
    found.into_iter().map(str::to_owned).collect()
}

fn is_issue_reference(token: &str) -> bool {
    token
        .strip_prefix('#')
        .is_some_and(|digits| !digits.is_empty() && digits.chars().all(|ch| ch.is_ascii_digit()))
}

/// Formats `count` with a singular or plural noun.
pub(crate) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

pub(crate) fn commit_line(commit: &CommitSummary) -> String {
    format!("- `{}` {}", commit.short_sha(), commit.title())
}

/// Renders the summary comment body.
///
/// Sections with nothing to show are left out.
#[must_use]
pub fn format_summary(
    snapshot: &PullRequestSnapshot,
    commits: &[CommitSummary],
    files: &[FileChange],
) -> String {
    let size = SizeLabel::from_total(snapshot.total_changes());
    let file_count = snapshot
        .changed_files
        .and_then(|count| usize::try_from(count).ok())
        .unwrap_or(files.len());

    let mut lines = vec![
        SUMMARY_MARKER.to_owned(),
        "### PR Summary".to_owned(),
        format!("**Title:** {}", snapshot.title),
        format!("**Author:** @{}", snapshot.author),
        format!(
            "**Branch:** `{}` \u{2192} `{}`",
            snapshot.head_ref, snapshot.base_ref
        ),
        format!(
            "**Scope:** {}, {}, **+{} / -{}** ({} {})",
            plural(file_count, "file"),
            plural(commits.len(), "commit"),
            snapshot.additions,
            snapshot.deletions,
            size.icon(),
            size.label()
        ),
    ];

    let recent = recent_commits(commits);
    if !recent.is_empty() {
        lines.push(String::new());
        lines.push("#### Recent commits".to_owned());
        lines.extend(recent.into_iter().map(commit_line));
    }

    let ranked = top_files(files);
    if !ranked.is_empty() {
        lines.push(String::new());
        lines.push("#### Most-changed files".to_owned());
        lines.extend(ranked.into_iter().map(|file| {
            format!(
                "- `{}` ({}, +{}/-{})",
                file.path, file.status, file.additions, file.deletions
            )
        }));
    }

    let issues = linked_issues(&snapshot.body);
    if !issues.is_empty() {
        lines.push(String::new());
        lines.push("#### Linked issues".to_owned());
        lines.push(format!("- {}", issues.join(" ")));
    }

    lines.push(String::new());
    lines.push(FOOTER.to_owned());
    lines.join("\n")
}

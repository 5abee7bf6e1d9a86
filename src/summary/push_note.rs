//! Short note announcing a new push to a pull request's branch.

use super::{SECTION_LIMIT, commit_line};
use crate::github::{CommitSha, CommitSummary};

/// Hidden marker identifying the managed push note.
pub const PUSH_MARKER: &str = "<!-- pr-herald-push -->";

/// Renders the push note body.
///
/// `commits` are listed in the order given, capped at ten with a count of
/// the remainder. The commit block is omitted when `commits` is empty.
#[must_use]
pub fn format_push_note(branch: &str, head: &CommitSha, commits: &[CommitSummary]) -> String {
    let mut lines = vec![
        PUSH_MARKER.to_owned(),
        format!(
            "\u{1F4E6} New push detected on `{branch}` at `{}`.",
            head.short()
        ),
    ];

    if !commits.is_empty() {
        lines.push(String::new());
        lines.push("Recent commits:".to_owned());
        lines.extend(commits.iter().take(SECTION_LIMIT).map(commit_line));
        let remaining = commits.len().saturating_sub(SECTION_LIMIT);
        if remaining > 0 {
            lines.push(format!("...and {remaining} more."));
        }
    }

    lines.join("\n")
}

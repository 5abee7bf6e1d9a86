//! Identity wrappers for repositories, pull requests, commits, and tokens.

use std::fmt;

use super::error::HeraldError;

/// Number of characters shown for an abbreviated commit hash.
pub const SHORT_SHA_LEN: usize = 7;

const FULL_SHA_LEN: usize = 40;

/// Returns the abbreviated form of a commit hash.
///
/// Hashes shorter than [`SHORT_SHA_LEN`] are returned unchanged.
///
/// # Example
///
/// ```
/// use pr_herald::github::locator::short_sha;
///
/// assert_eq!(short_sha("0123456789abcdef"), "0123456");
/// assert_eq!(short_sha("abc"), "abc");
/// ```
#[must_use]
pub fn short_sha(sha: &str) -> &str {
    sha.char_indices()
        .nth(SHORT_SHA_LEN)
        .and_then(|(index, _)| sha.get(..index))
        .unwrap_or(sha)
}

/// Repository owner wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryOwner(String);

impl RepositoryOwner {
    pub(crate) fn new(value: &str) -> Result<Self, HeraldError> {
        if value.is_empty() {
            return Err(HeraldError::InvalidRepository {
                value: value.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the owner value.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Repository name wrapper to prevent parameter mix-ups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryName(String);

impl RepositoryName {
    pub(crate) fn new(value: &str) -> Result<Self, HeraldError> {
        if value.is_empty() {
            return Err(HeraldError::InvalidRepository {
                value: value.to_owned(),
            });
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the repository name.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Owner and name of the repository the run operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    owner: RepositoryOwner,
    name: RepositoryName,
}

impl RepositoryRef {
    /// Parses an `owner/name` string such as `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns [`HeraldError::InvalidRepository`] when either half is empty or
    /// the separator is missing.
    ///
    /// # Example
    ///
    /// ```
    /// use pr_herald::github::RepositoryRef;
    ///
    /// let repository = RepositoryRef::parse("octo/widgets").expect("should parse");
    /// assert_eq!(repository.owner().as_str(), "octo");
    /// assert_eq!(repository.name().as_str(), "widgets");
    /// ```
    pub fn parse(input: &str) -> Result<Self, HeraldError> {
        let invalid = || HeraldError::InvalidRepository {
            value: input.to_owned(),
        };
        let (owner, name) = input.trim().split_once('/').ok_or_else(invalid)?;
        if name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: RepositoryOwner::new(owner).map_err(|_| invalid())?,
            name: RepositoryName::new(name).map_err(|_| invalid())?,
        })
    }

    /// Repository owner.
    #[must_use]
    pub const fn owner(&self) -> &RepositoryOwner {
        &self.owner
    }

    /// Repository name.
    #[must_use]
    pub const fn name(&self) -> &RepositoryName {
        &self.name
    }

    fn base_path(&self) -> String {
        format!("/repos/{}/{}", self.owner.as_str(), self.name.as_str())
    }

    pub(crate) fn open_pulls_path(&self) -> String {
        format!("{}/pulls?state=open", self.base_path())
    }

    pub(crate) fn pull_request_path(&self, number: PullRequestNumber) -> String {
        format!("{}/pulls/{}", self.base_path(), number.get())
    }

    pub(crate) fn pull_request_commits_path(&self, number: PullRequestNumber) -> String {
        format!("{}/commits", self.pull_request_path(number))
    }

    pub(crate) fn pull_request_files_path(&self, number: PullRequestNumber) -> String {
        format!("{}/files", self.pull_request_path(number))
    }

    pub(crate) fn comments_path(&self, number: PullRequestNumber) -> String {
        format!("{}/issues/{}/comments", self.base_path(), number.get())
    }

    pub(crate) fn comment_path(&self, comment_id: u64) -> String {
        format!("{}/issues/comments/{comment_id}", self.base_path())
    }

    pub(crate) fn compare_path(&self, base: &CommitSha, head: &CommitSha) -> String {
        format!(
            "{}/compare/{}...{}",
            self.base_path(),
            base.as_str(),
            head.as_str()
        )
    }
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}/{}", self.owner.as_str(), self.name.as_str())
    }
}

/// Pull request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PullRequestNumber(u64);

impl PullRequestNumber {
    /// Wraps a pull request number, rejecting zero.
    ///
    /// # Errors
    ///
    /// Returns [`HeraldError::InvalidPullRequestNumber`] for zero.
    pub const fn new(value: u64) -> Result<Self, HeraldError> {
        if value == 0 {
            return Err(HeraldError::InvalidPullRequestNumber);
        }
        Ok(Self(value))
    }

    /// Parses a decimal pull request number.
    ///
    /// # Errors
    ///
    /// Returns [`HeraldError::InvalidPullRequestNumber`] when the input is not
    /// a positive integer.
    pub fn parse(input: &str) -> Result<Self, HeraldError> {
        input
            .trim()
            .parse::<u64>()
            .map_err(|_| HeraldError::InvalidPullRequestNumber)
            .and_then(Self::new)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PullRequestNumber {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// Full 40 character commit hash.
///
/// The abbreviated form is always derived from the full hash and never
/// stored separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitSha(String);

impl CommitSha {
    /// Validates a full commit hash.
    ///
    /// # Errors
    ///
    /// Returns [`HeraldError::InvalidCommitSha`] unless the input is exactly
    /// 40 hexadecimal characters. Uppercase digits are normalised to
    /// lowercase.
    pub fn parse(input: &str) -> Result<Self, HeraldError> {
        let trimmed = input.trim();
        let is_valid =
            trimmed.len() == FULL_SHA_LEN && trimmed.chars().all(|ch| ch.is_ascii_hexdigit());
        if !is_valid {
            return Err(HeraldError::InvalidCommitSha {
                value: input.to_owned(),
            });
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Borrow the full hash, in lowercase.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the seven character abbreviation.
    #[must_use]
    pub fn short(&self) -> &str {
        short_sha(&self.0)
    }

    /// Returns true for the all-zero hash GitHub reports for a new branch.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.0.chars().all(|ch| ch == '0')
    }
}

/// Bearer credential wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns `HeraldError::MissingToken` when the supplied string is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, HeraldError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(HeraldError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PersonalAccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl fmt::Debug for PersonalAccessToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("PersonalAccessToken(<redacted>)")
    }
}

//! Run configuration loaded from CLI, environment, and files.
//!
//! [`HeraldConfig`] merges its layers through ortho-config and is then
//! resolved once into an immutable [`RunContext`] that every component
//! receives. Nothing below this module reads the process environment.
//!
//! # Precedence
//!
//! Lowest to highest:
//!
//! 1. **Defaults** – built-in values
//! 2. **Configuration file** – `.pr-herald.toml` or `pr-herald.toml`
//! 3. **Environment variables** – `PR_HERALD_*`
//! 4. **Command-line arguments** – `--repository`, `--token`, ...
//!
//! Fields left unset by every layer fall back to the variables GitHub
//! Actions exports (`GITHUB_REPOSITORY`, `GITHUB_TOKEN`, `GITHUB_SHA`,
//! `GITHUB_REF`, `GITHUB_PR_NUMBER`, `GITHUB_EVENT_BEFORE`,
//! `GITHUB_API_URL`).
//!
//! # Configuration File
//!
//! ```toml
//! repository = "octo/widgets"
//! mode = "push"
//! max_attempts = 5
//! retry_base_delay_ms = 500
//! ```

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::github::error::HeraldError;
use crate::github::locator::{CommitSha, PersonalAccessToken, PullRequestNumber, RepositoryRef};
use crate::github::transport::{DEFAULT_TIMEOUT, RetryPolicy};

/// Public GitHub REST endpoint used when no override is configured.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1200;

const BRANCH_REF_PREFIX: &str = "refs/heads/";

const MIN_TIMEOUT_SECONDS: u64 = 1;

/// Which comment a run maintains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Full pull request summary.
    #[default]
    Summary,
    /// Short note listing the commits of the latest push.
    Push,
}

impl FromStr for RunMode {
    type Err = HeraldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "summary" => Ok(Self::Summary),
            "push" => Ok(Self::Push),
            other => Err(HeraldError::Configuration {
                message: format!("mode must be `summary` or `push`, got {other:?}"),
            }),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Summary => "summary",
            Self::Push => "push",
        })
    }
}

/// Layered configuration as supplied by the caller.
///
/// Values are kept as raw strings here and validated by
/// [`HeraldConfig::resolve`].
///
/// # Example
///
/// ```no_run
/// use ortho_config::OrthoConfig;
/// use pr_herald::HeraldConfig;
///
/// let config = HeraldConfig::load().expect("failed to load configuration");
/// let context = config.resolve().expect("configuration should be complete");
/// println!("maintaining the {} comment on {}", context.mode, context.repository);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "PR_HERALD",
    discovery(
        dotfile_name = ".pr-herald.toml",
        config_file_name = "pr-herald.toml",
        app_name = "pr-herald"
    )
)]
pub struct HeraldConfig {
    /// Repository in `owner/name` form.
    ///
    /// Falls back to `GITHUB_REPOSITORY`.
    #[ortho_config(cli_short = 'r')]
    pub repository: Option<String>,

    /// Bearer credential for the GitHub API.
    ///
    /// Falls back to `GITHUB_TOKEN`.
    #[ortho_config(cli_short = 't')]
    pub token: Option<String>,

    /// Head commit of the push.
    ///
    /// Falls back to `GITHUB_SHA`.
    #[ortho_config(cli_short = 's')]
    pub sha: Option<String>,

    /// Branch or full ref (`refs/heads/...`) of the push.
    ///
    /// Falls back to `GITHUB_REF`.
    #[ortho_config()]
    pub git_ref: Option<String>,

    /// Pull request to comment on, skipping the search.
    ///
    /// Falls back to `GITHUB_PR_NUMBER`. Values that are not positive
    /// integers are ignored with a warning.
    #[ortho_config(cli_short = 'p')]
    pub pr_number: Option<String>,

    /// Commit the branch pointed at before the push.
    ///
    /// Falls back to `GITHUB_EVENT_BEFORE`.
    #[ortho_config()]
    pub before_sha: Option<String>,

    /// REST API base URL, for GitHub Enterprise deployments.
    ///
    /// Falls back to `GITHUB_API_URL`, then [`DEFAULT_API_URL`].
    #[ortho_config()]
    pub api_url: Option<String>,

    /// `summary` (default) or `push`.
    #[ortho_config(cli_short = 'm')]
    pub mode: Option<String>,

    /// Attempts per API call before giving up.
    #[ortho_config()]
    pub max_attempts: u32,

    /// Backoff unit in milliseconds; attempt `n` waits `n` units.
    #[ortho_config()]
    pub retry_base_delay_ms: u64,

    /// Upper bound for a single HTTP request, in seconds; zero is raised
    /// to one.
    #[ortho_config()]
    pub request_timeout_seconds: u64,
}

impl Default for HeraldConfig {
    fn default() -> Self {
        Self {
            repository: None,
            token: None,
            sha: None,
            git_ref: None,
            pr_number: None,
            before_sha: None,
            api_url: None,
            mode: None,
            max_attempts: RetryPolicy::DEFAULT_MAX_ATTEMPTS,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
            request_timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// Validated inputs for one run, built once at startup.
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Repository the run operates on.
    pub repository: RepositoryRef,
    /// Bearer credential.
    pub token: PersonalAccessToken,
    /// REST API base URL without a trailing slash.
    pub api_base: Url,
    /// Head commit of the push.
    pub head_sha: Option<CommitSha>,
    /// Branch name of the push.
    pub branch: Option<String>,
    /// Pull request supplied by the caller.
    pub explicit_pr: Option<PullRequestNumber>,
    /// Commit before the push, absent for new branches.
    pub before_sha: Option<CommitSha>,
    /// Comment to maintain.
    pub mode: RunMode,
    /// Retry budget for each API call.
    pub retry: RetryPolicy,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HeraldConfig {
    /// Validates the configuration against the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`HeraldError::MissingToken`] or
    /// [`HeraldError::MissingRepository`] when a required input is absent,
    /// and a validation error for a malformed repository, head SHA, URL, or
    /// mode.
    pub fn resolve(&self) -> Result<RunContext, HeraldError> {
        self.resolve_with(|name| env::var(name).ok())
    }

    /// Validates the configuration using `lookup` for the GitHub Actions
    /// fallbacks.
    ///
    /// # Errors
    ///
    /// See [`HeraldConfig::resolve`].
    pub fn resolve_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<RunContext, HeraldError> {
        let pick = |value: Option<&String>, variable: &str| {
            value
                .cloned()
                .or_else(|| lookup(variable))
                .map(|raw| raw.trim().to_owned())
                .filter(|raw| !raw.is_empty())
        };

        let token = pick(self.token.as_ref(), "GITHUB_TOKEN").ok_or(HeraldError::MissingToken)?;
        let repository = pick(self.repository.as_ref(), "GITHUB_REPOSITORY")
            .ok_or(HeraldError::MissingRepository)?;
        let api_url = pick(self.api_url.as_ref(), "GITHUB_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        let head_sha = pick(self.sha.as_ref(), "GITHUB_SHA")
            .map(|raw| CommitSha::parse(&raw))
            .transpose()?;
        let mode = self
            .mode
            .as_deref()
            .map_or(Ok(RunMode::default()), str::parse)?;

        Ok(RunContext {
            repository: RepositoryRef::parse(&repository)?,
            token: PersonalAccessToken::new(token)?,
            api_base: parse_api_base(&api_url)?,
            head_sha,
            branch: pick(self.git_ref.as_ref(), "GITHUB_REF").map(|raw| branch_name(&raw)),
            explicit_pr: pick(self.pr_number.as_ref(), "GITHUB_PR_NUMBER")
                .and_then(|raw| explicit_pull_request(&raw)),
            before_sha: pick(self.before_sha.as_ref(), "GITHUB_EVENT_BEFORE")
                .and_then(|raw| before_commit(&raw)),
            mode,
            retry: RetryPolicy::new(
                self.max_attempts,
                Duration::from_millis(self.retry_base_delay_ms),
            ),
            timeout: Duration::from_secs(self.request_timeout_seconds.max(MIN_TIMEOUT_SECONDS)),
        })
    }
}

fn branch_name(git_ref: &str) -> String {
    git_ref
        .strip_prefix(BRANCH_REF_PREFIX)
        .unwrap_or(git_ref)
        .to_owned()
}

fn explicit_pull_request(raw: &str) -> Option<PullRequestNumber> {
    PullRequestNumber::parse(raw)
        .inspect_err(|_| {
            tracing::warn!("ignoring pull request number {raw:?}; searching open pull requests");
        })
        .ok()
}

fn before_commit(raw: &str) -> Option<CommitSha> {
    match CommitSha::parse(raw) {
        Ok(sha) if sha.is_null() => None,
        Ok(sha) => Some(sha),
        Err(error) => {
            tracing::warn!("ignoring before SHA: {error}");
            None
        }
    }
}

fn parse_api_base(raw: &str) -> Result<Url, HeraldError> {
    Url::parse(raw.trim_end_matches('/'))
        .map_err(|error| HeraldError::InvalidUrl(format!("{raw}: {error}")))
}

#[cfg(test)]
mod tests;

//! Error types exposed by the GitHub access layer.

use thiserror::Error;

/// Errors surfaced while validating input or communicating with GitHub.
///
/// A missing pull request and an unavailable commit comparison are not
/// represented here: the resolver reports the former as `None` and the
/// push-note flow downgrades the latter to a logged warning.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HeraldError {
    /// The bearer credential was missing.
    #[error("GitHub token is required (set GITHUB_TOKEN or PR_HERALD_TOKEN)")]
    MissingToken,

    /// The repository identity was missing.
    #[error("repository is required (set GITHUB_REPOSITORY or PR_HERALD_REPOSITORY)")]
    MissingRepository,

    /// The repository identity did not match `owner/name`.
    #[error("repository must be in the form owner/name, got {value:?}")]
    InvalidRepository {
        /// The rejected input.
        value: String,
    },

    /// A commit SHA was not a 40 character hexadecimal string.
    #[error("commit SHA must be 40 hexadecimal characters, got {value:?}")]
    InvalidCommitSha {
        /// The rejected input.
        value: String,
    },

    /// The pull request number is not a valid integer.
    #[error("pull request number must be a positive integer")]
    InvalidPullRequestNumber,

    /// The API base URL could not be parsed.
    #[error("API base URL is invalid: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// GitHub rejected the request with a client error; never retried.
    #[error("GitHub API {method} {path} failed with status {status}: {payload}")]
    Terminal {
        /// HTTP verb of the failed call.
        method: String,
        /// API path of the failed call.
        path: String,
        /// Status code returned by GitHub.
        status: u16,
        /// Decoded and truncated response body.
        payload: String,
    },

    /// Every attempt failed with a server or network error.
    #[error(
        "GitHub API {method} {path} failed after {attempts} attempts{}: {payload}",
        .status.map_or_else(String::new, |code| format!(" (last status {code})"))
    )]
    RetriesExhausted {
        /// HTTP verb of the failed call.
        method: String,
        /// API path of the failed call.
        path: String,
        /// Number of attempts made.
        attempts: u32,
        /// Last status observed, absent when the last failure was a network error.
        status: Option<u16>,
        /// Last response body or network error detail.
        payload: String,
    },

    /// A response body could not be decoded into the expected shape.
    #[error("failed to decode GitHub response for {path}: {message}")]
    Decode {
        /// API path whose response failed to decode.
        path: String,
        /// Decoder error detail.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl HeraldError {
    /// Returns the HTTP status attached to a transport failure, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Terminal { status, .. } => Some(*status),
            Self::RetriesExhausted { status, .. } => *status,
            _ => None,
        }
    }
}

//! pr-herald keeps an up-to-date, machine-managed comment on GitHub pull
//! requests.
//!
//! On every push the crate finds the open pull request the push belongs to,
//! renders either a full summary or a short push note, and creates or
//! refreshes a single marker-tagged comment. API calls retry server and
//! network failures with linear backoff and fail fast on client errors.

pub mod config;
pub mod github;
pub mod summary;
pub mod workflow;

pub use config::{HeraldConfig, RunContext, RunMode};
pub use github::{HeraldError, PersonalAccessToken, PullRequestNumber, RepositoryRef};
pub use workflow::{RunOutcome, run};

//! Unit tests for configuration loading and resolution.
//!
//! - `helpers`: shared layer composition
//! - `precedence`: layer precedence and defaults
//! - `resolution`: validation and normalisation into a run context
//! - `environment`: GitHub Actions variable fallbacks

mod helpers;

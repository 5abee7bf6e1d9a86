//! pr-herald CLI entrypoint.

use std::borrow::Borrow;
use std::io::{self, Write};
use std::process::ExitCode;

use ortho_config::OrthoConfig;
use pr_herald::{HeraldConfig, HeraldError};
use tracing::Level;

mod cli;

use cli::output::{requested_information, write_failure_to, write_information, write_outcome};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if write_failure_to(&mut io::stderr().lock(), &error).is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), HeraldError> {
    let Some(config) = load_config()? else {
        return Ok(());
    };
    let context = config.resolve()?;
    let outcome = pr_herald::run(&context)?;
    write_outcome(&outcome)?;
    io::stdout().lock().flush().map_err(|error| HeraldError::Io {
        message: error.to_string(),
    })
}

/// Loads configuration from CLI, environment, and files.
///
/// Returns `None` after printing help or version text.
///
/// # Errors
///
/// Returns [`HeraldError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<Option<HeraldConfig>, HeraldError> {
    match HeraldConfig::load() {
        Ok(config) => Ok(Some(config)),
        Err(error) => match requested_information(error.borrow()) {
            Some(text) => write_information(&text).map(|()| None),
            None => Err(HeraldError::Configuration {
                message: error.to_string(),
            }),
        },
    }
}

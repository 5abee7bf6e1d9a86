//! Writes the run result to the standard streams.

use std::io::{self, Write};

use clap::error::ErrorKind;
use ortho_config::OrthoError;
use pr_herald::{HeraldError, RunOutcome};

/// Prefix of the diagnostic line written for a failed run.
pub const FAILURE_PREFIX: &str = "Failed to post pull request comment";

/// Writes the one-line confirmation for a successful run to stdout.
pub fn write_outcome(outcome: &RunOutcome) -> Result<(), HeraldError> {
    let mut stdout = io::stdout().lock();
    write_outcome_to(&mut stdout, outcome)
}

/// Writes the one-line confirmation to the given writer.
pub fn write_outcome_to<W: Write>(writer: &mut W, outcome: &RunOutcome) -> Result<(), HeraldError> {
    writeln!(writer, "{outcome}").map_err(|error| io_error(&error))
}

/// Writes the diagnostic line for a failed run to the given writer.
pub fn write_failure_to<W: Write>(writer: &mut W, error: &HeraldError) -> io::Result<()> {
    writeln!(writer, "{FAILURE_PREFIX}: {error}")
}

/// Returns the rendered text when argument parsing stopped to show help or
/// version information rather than because of a mistake.
pub fn requested_information(error: &OrthoError) -> Option<String> {
    match error {
        OrthoError::CliParsing(cli)
            if matches!(cli.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) =>
        {
            Some(cli.render().to_string())
        }
        _ => None,
    }
}

/// Writes help or version text to stdout.
pub fn write_information(text: &str) -> Result<(), HeraldError> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "{text}").map_err(|error| io_error(&error))
}

fn io_error(error: &io::Error) -> HeraldError {
    HeraldError::Io {
        message: error.to_string(),
    }
}

//! Helpers for classifying parse failures.

use clap::error::ErrorKind;

use super::FlagarizeError;

/// Returns `true` when the error wraps clap's `--help` or `--version` output.
///
/// Clap surfaces these requests as errors carrying the rendered text, so
/// entry points usually print them via [`clap::Error::exit`] and terminate
/// with a zero status instead of reporting a failure.
#[must_use]
pub fn is_display_request(err: &FlagarizeError) -> bool {
    match err {
        FlagarizeError::CliParsing(clap_err) => matches!(
            clap_err.kind(),
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
        ),
        _ => false,
    }
}

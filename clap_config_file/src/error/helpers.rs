//! Helpers for classifying and rendering errors at the command line.

use std::sync::Arc;

use clap::{Command, Error as ClapError, error::ErrorKind};

use super::ConfigFileError;

/// Returns `true` when a [`clap::Error`] corresponds to `--help` or
/// `--version`.
///
/// Entry points can delegate these to [`clap::Error::exit`] to keep the zero
/// exit status `clap` uses for display requests.
#[must_use]
pub fn is_display_request(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

impl ConfigFileError {
    /// The `clap` error kind matching this failure.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CliParsing(err) => err.kind(),
            Self::BadOptionUsage { .. } | Self::Callback { .. } | Self::Validation { .. } => {
                ErrorKind::ValueValidation
            }
        }
    }

    /// Render this error as a usage error of `command`.
    ///
    /// Parsing failures are returned unchanged. Every other variant becomes a
    /// [`ErrorKind::ValueValidation`] error carrying the usage line of
    /// `command`, so [`clap::Error::exit`] reports it with a non-zero exit
    /// code.
    #[must_use]
    pub fn into_clap_error(self, command: &mut Command) -> ClapError {
        match self {
            Self::CliParsing(err) => *err,
            other => command.error(other.kind(), other.to_string()),
        }
    }

    /// Print this error and exit the process.
    ///
    /// Help and version requests exit with status 0; everything else exits
    /// with `clap`'s usage status. An error still shared elsewhere is
    /// reported through its message and kind.
    pub fn exit(self: Arc<Self>, command: &mut Command) -> ! {
        match Arc::try_unwrap(self) {
            Ok(err) => err.into_clap_error(command).exit(),
            Err(shared) => command.error(shared.kind(), shared.to_string()).exit(),
        }
    }
}

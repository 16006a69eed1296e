//! Primary error enum for configuration injection flows.

use thiserror::Error;

use crate::provider::BoxError;

/// Errors that can occur while injecting configuration defaults.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigFileError {
    /// Error parsing command-line arguments.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// The provider could not turn the configuration file into defaults.
    #[error("Invalid value for '{option}': Error reading configuration file: {source}")]
    BadOptionUsage {
        /// Display name of the configuration option, for example `--config`.
        option: String,
        /// Underlying error reported by the provider.
        #[source]
        source: BoxError,
    },

    /// The downstream callback attached to the configuration option failed.
    #[error("Invalid value for '{option}': {source}")]
    Callback {
        /// Display name of the configuration option.
        option: String,
        /// Error returned by the callback.
        #[source]
        source: BoxError,
    },

    /// A configuration value does not fit the option it targets.
    #[error("Invalid configuration value for '{key}': {message}")]
    Validation {
        /// Default map key that failed validation.
        key: String,
        /// Human-readable explanation of the validation failure.
        message: String,
    },
}

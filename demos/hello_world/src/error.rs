//! Error types for the `hello_world` demo.
//!
//! `HelloWorldError` wraps configuration failures alongside local validation
//! issues so `main` can decide how each one is reported.

use std::sync::Arc;

use clap_config_file::ConfigFileError;
use thiserror::Error;

/// Errors raised by the demo.
#[derive(Debug, Error)]
pub enum HelloWorldError {
    /// The command line or the configuration file could not be processed.
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ConfigFileError>),
    /// The resolved options do not describe a valid greeting.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The greeting could not be written.
    #[error("failed to write greeting: {0}")]
    Output(#[from] std::io::Error),
}

/// Result alias used across the demo.
pub type Result<T> = std::result::Result<T, HelloWorldError>;

/// Problems with the resolved options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No greeting words were provided.
    #[error("at least one salutation must be provided")]
    MissingSalutation,
    /// A salutation collapsed to nothing after trimming.
    #[error("salutations must contain visible characters (index {0})")]
    BlankSalutation(usize),
    /// The recipient collapsed to nothing after trimming.
    #[error("the recipient must contain visible characters")]
    BlankRecipient,
    /// Mutually exclusive delivery modes were enabled together.
    #[error("cannot combine --excited with --quiet")]
    ConflictingDeliveryModes,
    /// The farewell collapsed to nothing after trimming.
    #[error("farewell messages must contain visible characters")]
    BlankFarewell,
}

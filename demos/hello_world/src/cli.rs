//! Command-line surface of the demo.
//!
//! Every option can be given a default in the configuration file read through
//! `--config`. Options of the `take-leave` subcommand live in a
//! `[take-leave]` table.

use std::ffi::OsString;

use clap::{Args, Parser, Subcommand};
use clap_config_file::{ConfigOption, Parsed};

use crate::error::{Result, ValidationError};

/// Options shared by every workflow.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "hello-world",
    bin_name = "hello-world",
    about = "Friendly greeting demo that reads its defaults from a configuration file",
    version
)]
pub struct HelloWorldCli {
    /// Name of the person being greeted.
    #[arg(long, default_value = "World", env = "HELLO_WORLD_WHO")]
    pub who: String,
    /// Greeting words, used in order.
    #[arg(long = "salutation", value_name = "WORD", default_value = "Hello")]
    pub salutations: Vec<String>,
    /// Shout the greeting.
    #[arg(long)]
    pub excited: bool,
    /// Whisper the greeting.
    #[arg(long)]
    pub quiet: bool,
    /// Workflow to run after greeting.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Workflows offered by the demo.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Greet, then say goodbye.
    TakeLeave(TakeLeaveCommand),
}

/// Options for `take-leave`.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct TakeLeaveCommand {
    /// Words used to part.
    #[arg(long, default_value = "Goodbye")]
    pub farewell: String,
    /// Wave while leaving.
    #[arg(long)]
    pub wave: bool,
}

/// How the greeting is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryMode {
    /// Plain greeting.
    Standard,
    /// Upper-cased greeting.
    Enthusiastic,
    /// Trailing-off greeting.
    Quiet,
}

impl HelloWorldCli {
    /// Checks that the options describe a greeting.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for blank names or salutations and for
    /// conflicting delivery modes.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        if self.salutations.is_empty() {
            return Err(ValidationError::MissingSalutation);
        }
        if let Some(index) = self
            .salutations
            .iter()
            .position(|word| word.trim().is_empty())
        {
            return Err(ValidationError::BlankSalutation(index));
        }
        if self.who.trim().is_empty() {
            return Err(ValidationError::BlankRecipient);
        }
        if self.excited && self.quiet {
            return Err(ValidationError::ConflictingDeliveryModes);
        }
        Ok(())
    }

    /// The delivery mode selected by the flags.
    #[must_use]
    pub const fn delivery_mode(&self) -> DeliveryMode {
        if self.excited {
            DeliveryMode::Enthusiastic
        } else if self.quiet {
            DeliveryMode::Quiet
        } else {
            DeliveryMode::Standard
        }
    }
}

/// The `--config` option used by the demo, with `-c` as a short form.
#[must_use]
pub fn config_option() -> ConfigOption {
    ConfigOption::new().short('c')
}

/// Parses `args`, applying defaults from the configuration file.
///
/// # Errors
///
/// Returns [`crate::error::HelloWorldError::Configuration`] when the command
/// line or the configuration file is invalid, including help and version
/// requests.
pub fn parse_from<I, T>(args: I) -> Result<Parsed<HelloWorldCli>>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    Ok(config_option().try_parse_from(args)?)
}

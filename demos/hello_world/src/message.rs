//! Greeting planning and rendering.

use std::io::{self, Write};

use crate::cli::{DeliveryMode, HelloWorldCli, TakeLeaveCommand};
use crate::error::ValidationError;

/// Greeting ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingPlan {
    message: String,
    mode: DeliveryMode,
}

impl GreetingPlan {
    /// The formatted greeting.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// How the greeting is delivered.
    #[must_use]
    pub const fn mode(&self) -> DeliveryMode {
        self.mode
    }
}

/// Builds the greeting for the resolved options.
///
/// # Errors
///
/// Returns a [`ValidationError`] when the options are inconsistent.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use hello_world::cli::HelloWorldCli;
/// use hello_world::message::build_plan;
///
/// let cli = HelloWorldCli::parse_from(["hello-world", "--who", "Ada", "--excited"]);
/// let plan = build_plan(&cli).map_err(|err| err.to_string());
/// assert_eq!(plan.map(|plan| plan.message().to_owned()), Ok("HELLO, ADA!".to_owned()));
/// ```
pub fn build_plan(cli: &HelloWorldCli) -> Result<GreetingPlan, ValidationError> {
    cli.validate()?;
    let salutation = cli
        .salutations
        .iter()
        .map(|word| word.trim())
        .collect::<Vec<_>>()
        .join(" ");
    let base = format!("{salutation}, {}", cli.who.trim());
    let mode = cli.delivery_mode();
    let message = match mode {
        DeliveryMode::Standard => format!("{base}!"),
        DeliveryMode::Enthusiastic => format!("{}!", base.to_uppercase()),
        DeliveryMode::Quiet => format!("{base}..."),
    };
    Ok(GreetingPlan { message, mode })
}

/// Builds the farewell that follows the greeting.
///
/// # Errors
///
/// Returns [`ValidationError::BlankFarewell`] when the farewell is blank.
pub fn build_farewell(
    cli: &HelloWorldCli,
    command: &TakeLeaveCommand,
) -> Result<String, ValidationError> {
    let parting = command.farewell.trim();
    if parting.is_empty() {
        return Err(ValidationError::BlankFarewell);
    }
    let mut farewell = format!("{parting}, {}.", cli.who.trim());
    if command.wave {
        farewell.push_str(" *waves*");
    }
    Ok(farewell)
}

/// Writes each line followed by a newline.
///
/// # Errors
///
/// Returns an [`io::Error`] when writing fails.
pub fn write_lines<W: Write>(writer: &mut W, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

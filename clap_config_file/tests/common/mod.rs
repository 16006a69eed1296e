//! Shared commands and helpers for the integration tests.

use anyhow::{Result, anyhow};
use clap::{Arg, ArgAction, Command};
use clap_config_file::{ConfigFileResult, Invocation};

/// A greeting command with a defaulted option, a flag and a list.
pub fn hello() -> Command {
    Command::new("hello")
        .arg(
            Arg::new("who")
                .long("who")
                .default_value("World")
                .env("HELLO_WHO"),
        )
        .arg(Arg::new("loud").long("loud").action(ArgAction::SetTrue))
        .arg(
            Arg::new("salutation")
                .long("salutation")
                .action(ArgAction::Append),
        )
}

/// The resolved `--who` value.
pub fn who(invocation: &Invocation) -> Option<&str> {
    invocation
        .matches
        .get_one::<String>("who")
        .map(String::as_str)
}

pub trait ConfigFileResultExt<T> {
    fn to_anyhow(self) -> Result<T>;
}

impl<T> ConfigFileResultExt<T> for ConfigFileResult<T> {
    fn to_anyhow(self) -> Result<T> {
        self.map_err(|err| anyhow!(err))
    }
}

//! Load `clap` option defaults from a configuration file.
//!
//! [`ConfigOption`] adds a `--config FILE` option to a [`clap::Command`] or a
//! [`clap::Parser`] type. Before the remaining options resolve, the option
//! locates a configuration file (given explicitly, or at a conventional
//! per-application path), asks a [`Provider`] to turn it into a
//! [`DefaultMap`], and installs those values as the defaults of the other
//! options.
//!
//! Precedence (lowest -> highest): hard-coded defaults < configuration file <
//! environment < command line.
//!
//! ```rust,no_run
//! use clap::{Arg, Command};
//! use clap_config_file::ConfigOption;
//!
//! # fn main() -> clap_config_file::ConfigFileResult<()> {
//! let command = Command::new("greet").arg(
//!     Arg::new("who").long("who").default_value("World").env("GREET_WHO"),
//! );
//! let invocation = ConfigOption::new().try_get_matches_from(command, ["greet"])?;
//! let who = invocation.matches.get_one::<String>("who");
//! # let _ = who;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

mod app_dir;
mod context;
mod defaults;
mod error;
mod inject;
mod option;
mod parse;
pub mod path;
pub mod provider;

pub use app_dir::app_config_dir;
pub use context::{Context, DefaultMap};
pub use defaults::apply_defaults;
pub use error::{ConfigFileError, is_display_request};
pub use inject::Injection;
pub use option::{Callback, ConfigOption};
pub use parse::{Invocation, Parsed};
pub use path::PathRules;
pub use provider::{BoxError, Provider, TomlProvider};
#[cfg(feature = "json")]
pub use provider::JsonProvider;
#[cfg(feature = "yaml")]
pub use provider::YamlProvider;

pub use camino;

/// Result type used throughout the crate.
pub type ConfigFileResult<T> = Result<T, Arc<ConfigFileError>>;

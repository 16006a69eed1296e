//! Test helpers shared across the workspace.
//!
//! - [`env`]: guards that set or remove environment variables and restore
//!   them on drop.
//! - [`figment`]: run setup code inside a `figment::Jail`.
//! - [`scratch`]: temporary directories with UTF-8 paths for configuration
//!   files.

pub mod env;
pub mod figment;
pub mod scratch;

//! Library facade for the `hello_world` demo so tests can reuse its command
//! line and greeting logic.

pub mod cli;
pub mod error;
pub mod message;

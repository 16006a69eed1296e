//! Error types produced while loading configuration defaults.

mod helpers;
mod types;

pub use helpers::is_display_request;
pub use types::ConfigFileError;

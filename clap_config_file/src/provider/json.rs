//! JSON provider, enabled by the `json` feature.

use camino::Utf8Path;
use figment::{
    Figment,
    providers::{Format, Json},
};

use super::{BoxError, Provider, load_format};
use crate::DefaultMap;

/// Reads defaults from a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonProvider {
    section: Option<String>,
}

impl JsonProvider {
    /// Creates a provider returning the whole document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the result to the object stored under `section`.
    #[must_use]
    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

impl Provider for JsonProvider {
    fn load(&self, path: &Utf8Path, _command_name: &str) -> Result<DefaultMap, BoxError> {
        load_format(path, self.section.as_deref(), |data| {
            match serde_json::from_str::<serde_json::Value>(data)? {
                serde_json::Value::Object(_) => Ok(Figment::from(Json::string(data))),
                _ => Err("top-level JSON value must be an object".into()),
            }
        })
    }
}

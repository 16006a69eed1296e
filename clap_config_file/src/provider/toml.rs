//! Default provider: TOML files with optional sections.

use camino::Utf8Path;
use figment::{
    Figment,
    providers::{Format, Toml},
};
use serde_json::Value;

use super::{BoxError, Provider, load_format};
use crate::DefaultMap;

/// Reads defaults from a TOML file.
///
/// Keys map to option ids; values keep their literal types, so
/// `verbose = true` stays a boolean and `names = ["a", "b"]` stays a list.
/// Dates and times are kept in their TOML spelling as strings.
///
/// ```rust,no_run
/// use clap_config_file::{Provider, TomlProvider};
/// use clap_config_file::camino::Utf8Path;
///
/// # fn main() -> Result<(), clap_config_file::BoxError> {
/// let provider = TomlProvider::new().section("server");
/// let defaults = provider.load(Utf8Path::new("app.toml"), "app")?;
/// # let _ = defaults;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TomlProvider {
    section: Option<String>,
}

impl TomlProvider {
    /// Creates a provider returning the whole file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the result to the table named `section`.
    ///
    /// A missing section yields an empty map.
    #[must_use]
    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

impl Provider for TomlProvider {
    fn load(&self, path: &Utf8Path, _command_name: &str) -> Result<DefaultMap, BoxError> {
        let mut defaults = load_format(path, self.section.as_deref(), |data| {
            // Validate with `toml` first so syntax errors carry line and column.
            ::toml::from_str::<::toml::Table>(data)?;
            Ok(Figment::from(Toml::string(data)))
        })?
        .into_inner();
        defaults.values_mut().for_each(datetimes_to_strings);
        Ok(defaults.into())
    }
}

/// Field under which `toml` serialises a datetime as a one-entry table.
const DATETIME_FIELD: &str = "$__toml_private_datetime";

/// Replace every serialised TOML datetime inside `value` with its text.
fn datetimes_to_strings(value: &mut Value) {
    if let Some(text) = datetime_text(value) {
        *value = Value::String(text);
        return;
    }
    match value {
        Value::Object(table) => table.values_mut().for_each(datetimes_to_strings),
        Value::Array(items) => items.iter_mut().for_each(datetimes_to_strings),
        _ => {}
    }
}

fn datetime_text(value: &Value) -> Option<String> {
    let table = value.as_object().filter(|table| table.len() == 1)?;
    table.get(DATETIME_FIELD)?.as_str().map(str::to_owned)
}

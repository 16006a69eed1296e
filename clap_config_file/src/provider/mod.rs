//! Providers turn a configuration file path into a [`DefaultMap`].
//!
//! [`TomlProvider`] is the default. JSON and YAML are available behind the
//! `json` and `yaml` features. Any closure with the shape
//! `Fn(&Utf8Path, &str) -> Result<DefaultMap, BoxError>` is a provider too,
//! which keeps test doubles and bespoke formats cheap to write.

use camino::Utf8Path;
use figment::{Figment, value::Value as FigmentValue};
use tracing::debug;

use crate::DefaultMap;

#[cfg(feature = "json")]
mod json;
mod read;
mod toml;
#[cfg(feature = "yaml")]
mod yaml;

#[cfg(feature = "json")]
pub use self::json::JsonProvider;
pub use self::toml::TomlProvider;
#[cfg(feature = "yaml")]
pub use self::yaml::YamlProvider;

/// Boxed error returned by providers and callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Converts a configuration file into option defaults.
pub trait Provider {
    /// Loads the defaults stored at `path` for the command `command_name`.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or its contents are
    /// malformed. The injector reports it as a bad use of the configuration
    /// option.
    fn load(&self, path: &Utf8Path, command_name: &str) -> Result<DefaultMap, BoxError>;
}

impl<F> Provider for F
where
    F: Fn(&Utf8Path, &str) -> Result<DefaultMap, BoxError>,
{
    fn load(&self, path: &Utf8Path, command_name: &str) -> Result<DefaultMap, BoxError> {
        self(path, command_name)
    }
}

/// Shared loading flow for the file-format providers.
///
/// A missing file (or a path that is not a regular file) yields an empty map.
/// Otherwise `parse` turns the contents into a [`Figment`] and `section`, when
/// set, narrows the result to that table.
pub(crate) fn load_format<P>(
    path: &Utf8Path,
    section: Option<&str>,
    parse: P,
) -> Result<DefaultMap, BoxError>
where
    P: FnOnce(&str) -> Result<Figment, BoxError>,
{
    let Some(data) = read::read_optional(path)
        .map_err(|err| format!("failed to read {path}: {err}"))?
    else {
        debug!(%path, "configuration file not found; using no defaults");
        return Ok(DefaultMap::new());
    };
    let figment = parse(&data).map_err(|err| format!("failed to parse {path}: {err}"))?;
    select_section(&figment, section)
}

/// Extract the whole figment, or only the table named `section`.
fn select_section(figment: &Figment, section: Option<&str>) -> Result<DefaultMap, BoxError> {
    let Some(name) = section else {
        return Ok(figment.extract::<DefaultMap>()?);
    };
    match figment.find_value(name) {
        Ok(FigmentValue::Dict(..)) => Ok(figment.focus(name).extract::<DefaultMap>()?),
        Ok(other) => Err(format!(
            "section '{name}' must be a table, found {}",
            other.to_actual()
        )
        .into()),
        Err(err) if err.missing() => {
            debug!(section = name, "configuration section not present");
            Ok(DefaultMap::new())
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests;

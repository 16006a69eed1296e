//! Per-invocation state shared between the injector and default application.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mapping from option name to the value used when no explicit or
/// environment value is supplied.
///
/// Values keep the types the provider produced: booleans stay booleans and
/// lists stay lists. Tables under a subcommand's name hold that subcommand's
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefaultMap(Map<String, Value>);

impl DefaultMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `other` into `self`, overwriting keys that already exist.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Inserts a single value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Looks up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if `key` has a value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Consumes the map, returning the underlying JSON object.
    #[must_use]
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for DefaultMap {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DefaultMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// State for a single command-line invocation.
///
/// Created when the invocation starts, updated by
/// [`ConfigOption::inject`](crate::ConfigOption::inject), read while option
/// defaults are installed and discarded with the invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    command_name: String,
    default_map: DefaultMap,
    config_path: Option<Utf8PathBuf>,
}

impl Context {
    /// Creates a context with an empty default map.
    #[must_use]
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
            ..Self::default()
        }
    }

    /// Name of the command, used to locate the implicit configuration file.
    #[must_use]
    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    /// Defaults injected so far.
    #[must_use]
    pub const fn default_map(&self) -> &DefaultMap {
        &self.default_map
    }

    /// Mutable access to the injected defaults.
    pub const fn default_map_mut(&mut self) -> &mut DefaultMap {
        &mut self.default_map
    }

    /// Path of the configuration file handed to the provider, if any.
    #[must_use]
    pub fn config_path(&self) -> Option<&Utf8Path> {
        self.config_path.as_deref()
    }

    pub(crate) fn set_config_path(&mut self, path: Utf8PathBuf) {
        self.config_path = Some(path);
    }

    /// Consumes the context, returning its default map.
    #[must_use]
    pub fn into_default_map(self) -> DefaultMap {
        self.default_map
    }
}

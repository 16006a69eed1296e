//! YAML provider backed by `serde-saphyr`, enabled by the `yaml` feature.

use std::collections::BTreeMap;

use camino::Utf8Path;
use figment::{
    Figment, Metadata, Profile,
    error::Kind,
    value::{Dict, Value as FigmentValue},
};
use serde_saphyr::Options;

use super::{BoxError, Provider, load_format};
use crate::DefaultMap;

/// Figment source over in-memory YAML using strict boolean semantics.
#[derive(Debug, Clone)]
struct SaphyrYaml {
    contents: String,
}

impl figment::Provider for SaphyrYaml {
    fn metadata(&self) -> Metadata {
        Metadata::named("Saphyr YAML")
    }

    fn data(&self) -> Result<BTreeMap<Profile, Dict>, figment::Error> {
        let value: FigmentValue = serde_saphyr::from_str_with_options(
            &self.contents,
            Options {
                strict_booleans: true,
                ..Options::default()
            },
        )
        .map_err(|err| figment::Error::from(Kind::Message(err.to_string())))?;
        let actual = value.to_actual();
        let dict = value
            .into_dict()
            .ok_or_else(|| figment::Error::from(Kind::InvalidType(actual, "map".into())))?;
        Ok(Profile::Default.collect(dict))
    }
}

/// Reads defaults from a YAML mapping.
///
/// Only `true` and `false` are booleans; `yes`/`no` stay strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YamlProvider {
    section: Option<String>,
}

impl YamlProvider {
    /// Creates a provider returning the whole document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the result to the mapping stored under `section`.
    #[must_use]
    pub fn section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

impl Provider for YamlProvider {
    fn load(&self, path: &Utf8Path, _command_name: &str) -> Result<DefaultMap, BoxError> {
        load_format(path, self.section.as_deref(), |data| {
            let source = SaphyrYaml {
                contents: data.to_owned(),
            };
            // Surface syntax errors here rather than at extraction time.
            figment::Provider::data(&source)?;
            Ok(Figment::from(source))
        })
    }
}

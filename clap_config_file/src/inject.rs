//! Locating the configuration file and merging it into the context.

use std::ffi::OsString;
use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::Command;
use clap::builder::{OsStringValueParser, TypedValueParser};
use tracing::{debug, warn};

use crate::{ConfigFileError, ConfigFileResult, ConfigOption, Context, app_config_dir};

/// Outcome of [`ConfigOption::inject`].
#[derive(Debug, Clone, PartialEq)]
pub struct Injection {
    /// Context carrying the merged defaults.
    pub context: Context,
    /// The option's value after the callback ran.
    pub value: Option<Utf8PathBuf>,
}

impl ConfigOption {
    /// Merge the configuration file's defaults into `context`.
    ///
    /// `value` is the path supplied on the command line or through the
    /// environment, or the configured default path. When it is absent and
    /// the option is implicit, `<app config dir>/<config file name>` is used
    /// instead, where the directory is named after the context's command.
    /// Without any path no file is read. The callback, if set, always runs
    /// last and its return value becomes [`Injection::value`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigFileError::BadOptionUsage`] when the provider fails and
    /// [`ConfigFileError::Callback`] when the callback does.
    pub fn inject(
        &self,
        mut context: Context,
        value: Option<Utf8PathBuf>,
    ) -> ConfigFileResult<Injection> {
        let path = match value {
            Some(path) => Some(path),
            None if self.implicit => self.implicit_path(context.command_name()),
            None => None,
        };

        if let Some(path) = &path {
            debug!(%path, command = context.command_name(), "loading configuration defaults");
            let loaded = self
                .provider
                .load(path, context.command_name())
                .map_err(|source| {
                    warn!(%path, error = %source, "configuration file rejected");
                    Arc::new(ConfigFileError::BadOptionUsage {
                        option: self.display_name(),
                        source,
                    })
                })?;
            debug!(%path, keys = loaded.len(), "merged configuration defaults");
            context.default_map_mut().merge(loaded);
            context.set_config_path(path.clone());
        }

        let value = match &self.callback {
            Some(callback) => callback(&mut context, self, path).map_err(|source| {
                Arc::new(ConfigFileError::Callback {
                    option: self.display_name(),
                    source,
                })
            })?,
            None => path,
        };
        Ok(Injection { context, value })
    }

    fn implicit_path(&self, command_name: &str) -> Option<Utf8PathBuf> {
        let Some(dir) = app_config_dir(command_name) else {
            debug!(command = command_name, "no application configuration directory");
            return None;
        };
        Some(dir.join(&self.config_file_name))
    }

    /// Find the path the user supplied before the other options resolve.
    ///
    /// Parses `args` leniently so that unrelated mistakes, help and version
    /// requests are left for the real parse. The raw value is then checked
    /// against the path rules, whose failure is reported straight away.
    /// Falls back to the default path.
    pub(crate) fn eager_value(
        &self,
        command: &Command,
        args: &[OsString],
    ) -> ConfigFileResult<Option<Utf8PathBuf>> {
        let lenient = self
            .attach(command.clone())
            .ignore_errors(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .disable_help_subcommand(true)
            .mut_arg(self.id.as_str(), |arg| {
                arg.value_parser(OsStringValueParser::new())
            });
        let raw = match lenient.try_get_matches_from(args.iter().cloned()) {
            Ok(matches) => matches
                .try_get_one::<OsString>(self.id.as_str())
                .ok()
                .flatten()
                .cloned(),
            Err(err) => {
                debug!(error = %err, "lenient parse failed; leaving it to the full parse");
                None
            }
        };
        let Some(raw) = raw else {
            return Ok(self.default_path.clone());
        };
        let arg = self.to_arg();
        self.path_rules
            .parse_ref(command, Some(&arg), &raw)
            .map(Some)
            .map_err(|err| Arc::new(ConfigFileError::CliParsing(Box::new(err))))
    }
}

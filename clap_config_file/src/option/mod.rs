//! Declaration of the configuration option and its settings.

use std::fmt;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Arg, ArgAction, Command};

use crate::provider::{BoxError, Provider, TomlProvider};
use crate::{Context, PathRules};

/// Downstream callback run after the configuration file has been merged.
///
/// It receives the invocation context, the option declaration and the path
/// that was used (explicit or implicit), and returns the value exposed to the
/// command body.
pub type Callback = Arc<
    dyn Fn(&mut Context, &ConfigOption, Option<Utf8PathBuf>) -> Result<Option<Utf8PathBuf>, BoxError>
        + Send
        + Sync,
>;

/// A `--config FILE` option that loads defaults for the other options.
///
/// Every setting has a default matching the conventional behaviour: the
/// option is spelled `--config`, runs eagerly, reads TOML, and falls back to
/// `<app config dir>/<command name>/config` when no path is given.
///
/// ```rust
/// use clap_config_file::{ConfigOption, TomlProvider};
///
/// let option = ConfigOption::new()
///     .long("settings")
///     .implicit(false)
///     .provider(TomlProvider::new().section("greet"));
/// assert_eq!(option.display_name(), "--settings");
/// ```
#[derive(Clone)]
pub struct ConfigOption {
    pub(crate) id: String,
    long: String,
    short: Option<char>,
    aliases: Vec<String>,
    help: String,
    value_name: String,
    env: Option<String>,
    pub(crate) default_path: Option<Utf8PathBuf>,
    pub(crate) eager: bool,
    pub(crate) expose_value: bool,
    pub(crate) path_rules: PathRules,
    pub(crate) callback: Option<Callback>,
    pub(crate) provider: Arc<dyn Provider + Send + Sync>,
    cmd_name: Option<String>,
    pub(crate) config_file_name: String,
    pub(crate) implicit: bool,
}

impl Default for ConfigOption {
    fn default() -> Self {
        Self {
            id: "config".to_owned(),
            long: "config".to_owned(),
            short: None,
            aliases: Vec::new(),
            help: "Read configuration from FILE.".to_owned(),
            value_name: "FILE".to_owned(),
            env: None,
            default_path: None,
            eager: true,
            expose_value: false,
            path_rules: PathRules::default(),
            callback: None,
            provider: Arc::new(TomlProvider::default()),
            cmd_name: None,
            config_file_name: "config".to_owned(),
            implicit: true,
        }
    }
}

impl fmt::Debug for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigOption")
            .field("id", &self.id)
            .field("long", &self.long)
            .field("short", &self.short)
            .field("env", &self.env)
            .field("default_path", &self.default_path)
            .field("eager", &self.eager)
            .field("expose_value", &self.expose_value)
            .field("path_rules", &self.path_rules)
            .field("has_callback", &self.callback.is_some())
            .field("cmd_name", &self.cmd_name)
            .field("config_file_name", &self.config_file_name)
            .field("implicit", &self.implicit)
            .finish_non_exhaustive()
    }
}

impl ConfigOption {
    /// Creates an option with the default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `clap` argument id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the long flag, without the leading dashes.
    #[must_use]
    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = long.into();
        self
    }

    /// Adds a short flag.
    #[must_use]
    pub const fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Adds an alternative long spelling.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Replaces the help text.
    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Replaces the value placeholder shown in help output.
    #[must_use]
    pub fn value_name(mut self, value_name: impl Into<String>) -> Self {
        self.value_name = value_name.into();
        self
    }

    /// Binds the option itself to an environment variable.
    #[must_use]
    pub fn env(mut self, env: impl Into<String>) -> Self {
        self.env = Some(env.into());
        self
    }

    /// Path used when none is supplied on the command line or environment.
    ///
    /// Takes priority over the implicit path.
    #[must_use]
    pub fn default_path(mut self, path: impl Into<Utf8PathBuf>) -> Self {
        self.default_path = Some(path.into());
        self
    }

    /// Inject before the other options resolve (the default).
    ///
    /// A non-eager option still loads the file, but only reports the result
    /// through [`Context::default_map`].
    #[must_use]
    pub const fn eager(mut self, eager: bool) -> Self {
        self.eager = eager;
        self
    }

    /// Report the resolved path (after the callback) to the caller.
    #[must_use]
    pub const fn expose_value(mut self, expose: bool) -> Self {
        self.expose_value = expose;
        self
    }

    /// Replaces every path rule at once.
    #[must_use]
    pub const fn path_rules(mut self, rules: PathRules) -> Self {
        self.path_rules = rules;
        self
    }

    /// Require the file to exist.
    #[must_use]
    pub const fn exists(mut self, exists: bool) -> Self {
        self.path_rules.exists = exists;
        self
    }

    /// Allow the path to name a regular file.
    #[must_use]
    pub const fn file_okay(mut self, file_okay: bool) -> Self {
        self.path_rules.file_okay = file_okay;
        self
    }

    /// Allow the path to name a directory.
    #[must_use]
    pub const fn dir_okay(mut self, dir_okay: bool) -> Self {
        self.path_rules.dir_okay = dir_okay;
        self
    }

    /// Require an existing path to be writable.
    #[must_use]
    pub const fn writable(mut self, writable: bool) -> Self {
        self.path_rules.writable = writable;
        self
    }

    /// Require an existing file to be readable.
    #[must_use]
    pub const fn readable(mut self, readable: bool) -> Self {
        self.path_rules.readable = readable;
        self
    }

    /// Resolve the path to absolute form.
    #[must_use]
    pub const fn resolve_path(mut self, resolve: bool) -> Self {
        self.path_rules.resolve_path = resolve;
        self
    }

    /// Runs `callback` after the defaults have been merged.
    #[must_use]
    pub fn callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut Context, &Self, Option<Utf8PathBuf>) -> Result<Option<Utf8PathBuf>, BoxError>
            + Send
            + Sync
            + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Replaces the provider used to read the file.
    #[must_use]
    pub fn provider<P>(mut self, provider: P) -> Self
    where
        P: Provider + Send + Sync + 'static,
    {
        self.provider = Arc::new(provider);
        self
    }

    /// Overrides the command name used to locate the implicit file.
    #[must_use]
    pub fn cmd_name(mut self, name: impl Into<String>) -> Self {
        self.cmd_name = Some(name.into());
        self
    }

    /// File name looked up inside the application's configuration directory.
    #[must_use]
    pub fn config_file_name(mut self, name: impl Into<String>) -> Self {
        self.config_file_name = name.into();
        self
    }

    /// Build a path from the application directory when none is given.
    #[must_use]
    pub const fn implicit(mut self, implicit: bool) -> Self {
        self.implicit = implicit;
        self
    }

    /// The `clap` argument id of this option.
    #[must_use]
    pub fn arg_id(&self) -> &str {
        &self.id
    }

    /// Name used in diagnostics, for example `--config`.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("--{}", self.long)
    }

    /// Configured default path, if any.
    #[must_use]
    pub fn default_path_value(&self) -> Option<&Utf8Path> {
        self.default_path.as_deref()
    }

    /// Command name for `command`: the override, or the command's own name.
    #[must_use]
    pub fn command_name_for(&self, command: &Command) -> String {
        self.cmd_name
            .clone()
            .unwrap_or_else(|| command.get_name().to_owned())
    }

    /// Builds the `clap` argument for this option.
    #[must_use]
    pub fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.id.clone())
            .long(self.long.clone())
            .value_name(self.value_name.clone())
            .help(self.help.clone())
            .num_args(1)
            .action(ArgAction::Set)
            .value_parser(self.path_rules);
        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        if !self.aliases.is_empty() {
            arg = arg.aliases(self.aliases.clone());
        }
        if let Some(env) = &self.env {
            arg = arg.env(env.clone());
        }
        arg
    }

    /// Registers the option on `command`.
    ///
    /// Leaves `command` untouched when it already defines an argument with
    /// this option's id.
    #[must_use]
    pub fn attach(&self, command: Command) -> Command {
        if command
            .get_arguments()
            .any(|arg| arg.get_id().as_str() == self.id)
        {
            return command;
        }
        command.arg(self.to_arg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_match_the_conventional_option() {
        let option = ConfigOption::new();
        assert_eq!(option.arg_id(), "config");
        assert_eq!(option.display_name(), "--config");
        assert!(option.eager);
        assert!(option.implicit);
        assert!(!option.expose_value);
        assert_eq!(option.config_file_name, "config");
        assert_eq!(option.path_rules, PathRules::default());
    }

    #[rstest]
    fn help_mentions_the_file() {
        let mut command = ConfigOption::new().attach(Command::new("cli"));
        let help = command.render_help().to_string();
        assert!(
            help.contains("--config <FILE>") && help.contains("Read configuration from FILE."),
            "unexpected help: {help}"
        );
    }

    #[rstest]
    fn attach_is_idempotent() {
        let option = ConfigOption::new();
        let command = option.attach(option.attach(Command::new("cli")));
        let count = command
            .get_arguments()
            .filter(|arg| arg.get_id().as_str() == "config")
            .count();
        assert_eq!(count, 1);
    }

    #[rstest]
    fn custom_spelling_is_used() {
        let option = ConfigOption::new().id("settings").long("settings").short('s');
        let arg = option.to_arg();
        assert_eq!(arg.get_long(), Some("settings"));
        assert_eq!(arg.get_short(), Some('s'));
    }

    #[rstest]
    #[case::inferred(None, "cli")]
    #[case::explicit(Some("other"), "other")]
    fn command_name_prefers_override(#[case] name: Option<&str>, #[case] expected: &str) {
        let option = name.map_or_else(ConfigOption::new, |name| ConfigOption::new().cmd_name(name));
        assert_eq!(option.command_name_for(&Command::new("cli")), expected);
    }
}

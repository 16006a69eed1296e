//! Entry points that run a full command-line parse with configuration
//! defaults.

use std::ffi::OsString;
use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::{ArgMatches, Command, CommandFactory, FromArgMatches, Parser};

use crate::defaults::apply;
use crate::{ConfigFileError, ConfigFileResult, ConfigOption, Context, Injection};

/// Result of [`ConfigOption::try_get_matches_from`].
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Matches from the final parse.
    pub matches: ArgMatches,
    /// Context holding the defaults read from the configuration file.
    pub context: Context,
    /// The option's value, present only when the option exposes it.
    pub value: Option<Utf8PathBuf>,
}

/// Result of [`ConfigOption::try_parse_from`].
#[derive(Debug, Clone)]
pub struct Parsed<P> {
    /// The parsed command-line structure.
    pub cli: P,
    /// Context holding the defaults read from the configuration file.
    pub context: Context,
    /// The option's value, present only when the option exposes it.
    pub value: Option<Utf8PathBuf>,
}

impl ConfigOption {
    /// Parse `args` against `command` with this option attached.
    ///
    /// An eager option resolves its own value first, loads the file, installs
    /// the file's values as defaults of the other arguments and then parses.
    /// A non-eager option parses first and loads the file afterwards; the
    /// loaded values are reported in [`Invocation::context`] only.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigFileError::CliParsing`] for invalid arguments (including
    /// a path rejected by the path rules and help or version requests),
    /// [`ConfigFileError::BadOptionUsage`] when the file cannot be loaded,
    /// [`ConfigFileError::Callback`] when the callback fails and
    /// [`ConfigFileError::Validation`] when a file value does not fit its
    /// option.
    pub fn try_get_matches_from<I, T>(
        &self,
        command: Command,
        args: I,
    ) -> ConfigFileResult<Invocation>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let command = self.attach(command);
        let context = Context::new(self.command_name_for(&command));

        if !self.eager {
            let matches = command
                .try_get_matches_from(args)
                .map_err(|err| Arc::new(ConfigFileError::from(Box::new(err))))?;
            let supplied = matches
                .try_get_one::<Utf8PathBuf>(self.id.as_str())
                .ok()
                .flatten()
                .cloned()
                .or_else(|| self.default_path.clone());
            let Injection { context, value } = self.inject(context, supplied)?;
            return Ok(Invocation {
                matches,
                context,
                value: self.exposed(value),
            });
        }

        let supplied = self.eager_value(&command, &args)?;
        let Injection { context, value } = self.inject(context, supplied)?;
        let command = apply(command, context.default_map(), Some(self.id.as_str()))?;
        let matches = command
            .try_get_matches_from(args)
            .map_err(|err| Arc::new(ConfigFileError::from(Box::new(err))))?;
        Ok(Invocation {
            matches,
            context,
            value: self.exposed(value),
        })
    }

    /// Parse `args` into `P` with this option attached to `P`'s command.
    ///
    /// # Errors
    ///
    /// As [`ConfigOption::try_get_matches_from`], plus
    /// [`ConfigFileError::CliParsing`] when the matches cannot be converted
    /// into `P`.
    pub fn try_parse_from<P, I, T>(&self, args: I) -> ConfigFileResult<Parsed<P>>
    where
        P: Parser,
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let Invocation {
            mut matches,
            context,
            value,
        } = self.try_get_matches_from(P::command(), args)?;
        let cli = P::from_arg_matches_mut(&mut matches).map_err(|err| {
            let mut command = self.attach(P::command());
            Arc::new(ConfigFileError::from(Box::new(err.format(&mut command))))
        })?;
        Ok(Parsed {
            cli,
            context,
            value,
        })
    }

    /// Like [`ConfigOption::try_get_matches_from`], printing the error and
    /// exiting the process on failure.
    #[must_use]
    pub fn get_matches_from<I, T>(&self, command: Command, args: I) -> Invocation
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut usage = self.attach(command.clone());
        match self.try_get_matches_from(command, args) {
            Ok(invocation) => invocation,
            Err(err) => err.exit(&mut usage),
        }
    }

    /// Like [`ConfigOption::try_parse_from`], printing the error and exiting
    /// the process on failure.
    #[must_use]
    pub fn parse_from<P, I, T>(&self, args: I) -> Parsed<P>
    where
        P: Parser,
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        match self.try_parse_from(args) {
            Ok(parsed) => parsed,
            Err(err) => err.exit(&mut self.attach(P::command())),
        }
    }

    fn exposed(&self, value: Option<Utf8PathBuf>) -> Option<Utf8PathBuf> {
        value.filter(|_| self.expose_value)
    }
}


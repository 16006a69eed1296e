//! Installing a [`DefaultMap`] as the default values of a [`Command`].
//!
//! Values become `clap` default values, so the usual precedence follows: a
//! command-line value beats an environment value, which beats the file, which
//! beats the hard-coded default it replaces. Each rendered value is checked
//! with the target argument's own value parser before it is installed.

use std::sync::Arc;

use clap::{Arg, ArgAction, Command};
use serde_json::Value;
use tracing::{debug, trace};

use crate::{ConfigFileError, ConfigFileResult, DefaultMap};

/// Install `defaults` as the default values of `command`'s arguments.
///
/// Keys match an argument by id, then by long flag. A key naming a
/// subcommand whose value is a table is applied to that subcommand. Keys
/// that match nothing are ignored, as are `null` values and empty lists.
/// Arguments receiving a default no longer count as required.
///
/// # Errors
///
/// Returns [`ConfigFileError::Validation`] when a value has the wrong shape
/// for its argument or is rejected by the argument's value parser.
pub fn apply_defaults(command: Command, defaults: &DefaultMap) -> ConfigFileResult<Command> {
    apply(command, defaults, None)
}

/// Like [`apply_defaults`], leaving the argument `skip` untouched.
pub(crate) fn apply(
    mut command: Command,
    defaults: &DefaultMap,
    skip: Option<&str>,
) -> ConfigFileResult<Command> {
    for (key, value) in defaults.iter() {
        if value.is_null() {
            continue;
        }
        let target = find_arg(&command, key).map(|arg| arg.get_id().as_str().to_owned());
        if let Some(id) = target {
            if skip == Some(id.as_str()) {
                trace!(key = key.as_str(), "configuration option does not take a default");
                continue;
            }
            let Some(values) = render(&command, key, value)? else {
                continue;
            };
            trace!(key = key.as_str(), ?values, "installing configuration default");
            command = command.mut_arg(id, |arg| arg.default_values(values).required(false));
        } else if let Value::Object(table) = value
            && let Some(sub) = command.find_subcommand(key).cloned()
        {
            let sub = apply(sub, &DefaultMap::from(table.clone()), skip)?;
            command = command.mut_subcommand(key, |_| sub);
        } else {
            debug!(key = key.as_str(), "no option matches configuration key");
        }
    }
    Ok(command)
}

fn find_arg<'a>(command: &'a Command, key: &str) -> Option<&'a Arg> {
    command
        .get_arguments()
        .find(|arg| arg.get_id().as_str() == key)
        .or_else(|| command.get_arguments().find(|arg| arg.get_long() == Some(key)))
}

/// Turn `value` into the strings installed as defaults of the argument
/// matching `key`. `None` means the argument takes no default.
fn render(command: &Command, key: &str, value: &Value) -> ConfigFileResult<Option<Vec<String>>> {
    let Some(arg) = find_arg(command, key) else {
        return Ok(None);
    };
    match arg.get_action() {
        ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version => {
            debug!(key, "display flags do not take configuration defaults");
            return Ok(None);
        }
        ArgAction::SetTrue | ArgAction::SetFalse => {
            return match value {
                Value::Bool(flag) => Ok(Some(vec![flag.to_string()])),
                other => Err(invalid(key, format!("expected a boolean, found {}", describe(other)))),
            };
        }
        ArgAction::Count => {
            return match value.as_u64().and_then(|n| u8::try_from(n).ok()) {
                Some(count) => Ok(Some(vec![count.to_string()])),
                None => Err(invalid(
                    key,
                    format!("expected a count between 0 and 255, found {value}"),
                )),
            };
        }
        _ => {}
    }

    let values = match value {
        Value::Array(items) => items
            .iter()
            .map(|item| scalar(key, item))
            .collect::<ConfigFileResult<Vec<_>>>()?,
        other => vec![scalar(key, other)?],
    };
    if values.is_empty() {
        return Ok(None);
    }
    if values.len() > 1 && !takes_multiple(arg) {
        return Err(invalid(
            key,
            format!("expected a single value, found a list of {}", values.len()),
        ));
    }
    probe(command, arg, key, &values)?;
    Ok(Some(values))
}

fn scalar(key: &str, value: &Value) -> ConfigFileResult<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Bool(flag) => Ok(flag.to_string()),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(invalid(
            key,
            format!("expected a string, number or boolean, found {}", describe(other)),
        )),
    }
}

fn takes_multiple(arg: &Arg) -> bool {
    matches!(arg.get_action(), ArgAction::Append)
        || arg
            .get_num_args()
            .is_some_and(|range| range.max_values() > 1)
}

/// Run `values` through the argument's value parser.
///
/// Values follow `--`, so a file value such as `-h` or `--` is parsed as
/// data and never as a flag or an end-of-options marker.
fn probe(command: &Command, arg: &Arg, key: &str, values: &[String]) -> ConfigFileResult<()> {
    let probe = Command::new(command.get_name().to_owned())
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new(key.to_owned())
                .num_args(1..)
                .action(ArgAction::Append)
                .value_parser(arg.get_value_parser().clone()),
        );
    probe
        .try_get_matches_from(std::iter::once("--").chain(values.iter().map(String::as_str)))
        .map(drop)
        .map_err(|err| invalid(key, first_line(&err)))
}

fn first_line(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_owned()
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a table",
    }
}

fn invalid(key: &str, message: String) -> Arc<ConfigFileError> {
    Arc::new(ConfigFileError::Validation {
        key: key.to_owned(),
        message,
    })
}

//! Locating the configuration file: explicit, environment, default and
//! implicit paths.

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, ensure};
use camino::Utf8Path;
use clap_config_file::{BoxError, ConfigOption, DefaultMap};
use common::{ConfigFileResultExt, hello, who};
use rstest::rstest;
use test_helpers::figment::{jail_error, with_jail};

/// Points `XDG_CONFIG_HOME` at `<jail>/xdg` and returns that directory.
#[cfg(any(unix, target_os = "redox"))]
fn jail_config_home(j: &mut figment::Jail) -> figment::error::Result<std::path::PathBuf> {
    let dir = j.create_dir("xdg")?;
    let abs = std::fs::canonicalize(&dir).map_err(jail_error)?;
    j.set_env("XDG_CONFIG_HOME", abs.display());
    Ok(abs)
}

#[rstest]
#[case::long_flag(&["hello", "--config", "alt.toml"])]
#[case::equals(&["hello", "--config=alt.toml"])]
fn explicit_path_is_loaded(#[case] args: &[&str]) -> Result<()> {
    let invocation = with_jail(|j| {
        j.create_file("alt.toml", "who = \"Universe\"\n")?;
        ConfigOption::new()
            .try_get_matches_from(hello(), args.iter().copied())
            .map_err(jail_error)
    })?;
    ensure!(who(&invocation) == Some("Universe"));
    let path = invocation
        .context
        .config_path()
        .map(Utf8Path::to_path_buf)
        .unwrap_or_default();
    ensure!(path.is_absolute() && path.ends_with("alt.toml"), "path: {path}");
    Ok(())
}

#[rstest]
fn custom_flag_spelling_is_honoured() -> Result<()> {
    let invocation = with_jail(|j| {
        j.create_file("alt.toml", "who = \"Universe\"\n")?;
        ConfigOption::new()
            .id("settings")
            .long("settings")
            .short('s')
            .try_get_matches_from(hello(), ["hello", "-s", "alt.toml"])
            .map_err(jail_error)
    })?;
    ensure!(who(&invocation) == Some("Universe"));
    Ok(())
}

#[rstest]
fn option_reads_its_own_environment_variable() -> Result<()> {
    let invocation = with_jail(|j| {
        j.create_file("alt.toml", "who = \"Universe\"\n")?;
        j.set_env("HELLO_CONFIG", "alt.toml");
        ConfigOption::new()
            .env("HELLO_CONFIG")
            .implicit(false)
            .try_get_matches_from(hello(), ["hello"])
            .map_err(jail_error)
    })?;
    ensure!(who(&invocation) == Some("Universe"));
    Ok(())
}

#[rstest]
fn default_path_is_used_when_none_is_given() -> Result<()> {
    let invocation = with_jail(|j| {
        j.create_file("fallback.toml", "who = \"Universe\"\n")?;
        ConfigOption::new()
            .default_path("fallback.toml")
            .try_get_matches_from(hello(), ["hello"])
            .map_err(jail_error)
    })?;
    ensure!(who(&invocation) == Some("Universe"));
    Ok(())
}

#[rstest]
fn provider_is_never_called_without_a_path() -> Result<()> {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let option = ConfigOption::new().implicit(false).provider(
        move |_: &Utf8Path, _: &str| -> Result<DefaultMap, BoxError> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(DefaultMap::new())
        },
    );
    let invocation = option
        .try_get_matches_from(hello(), ["hello"])
        .to_anyhow()?;
    ensure!(calls.load(Ordering::SeqCst) == 0);
    ensure!(invocation.context.config_path().is_none());
    ensure!(who(&invocation) == Some("World"));
    Ok(())
}

// Windows has no XDG base directories.
#[cfg(any(unix, target_os = "redox"))]
#[rstest]
fn implicit_path_follows_the_command_name() -> Result<()> {
    let invocation = with_jail(|j| {
        let home = jail_config_home(j)?;
        j.create_dir("xdg/hello")?;
        j.create_file("xdg/hello/config", "who = \"Universe\"\n")?;
        let invocation = ConfigOption::new()
            .try_get_matches_from(hello(), ["hello"])
            .map_err(jail_error)?;
        let expected = home.join("hello").join("config");
        if invocation.context.config_path().map(Utf8Path::as_std_path) != Some(expected.as_path()) {
            return Err(jail_error(format!(
                "unexpected path {:?}",
                invocation.context.config_path()
            )));
        }
        Ok(invocation)
    })?;
    ensure!(who(&invocation) == Some("Universe"));
    Ok(())
}

#[cfg(any(unix, target_os = "redox"))]
#[rstest]
fn implicit_path_honours_overrides() -> Result<()> {
    let invocation = with_jail(|j| {
        jail_config_home(j)?;
        j.create_dir("xdg/greeter")?;
        j.create_file("xdg/greeter/settings.toml", "who = \"Universe\"\n")?;
        ConfigOption::new()
            .cmd_name("Greeter")
            .config_file_name("settings.toml")
            .try_get_matches_from(hello(), ["hello"])
            .map_err(jail_error)
    })?;
    ensure!(who(&invocation) == Some("Universe"));
    ensure!(invocation.context.command_name() == "Greeter");
    Ok(())
}

#[cfg(any(unix, target_os = "redox"))]
#[rstest]
fn missing_implicit_file_is_not_an_error() -> Result<()> {
    let invocation = with_jail(|j| {
        jail_config_home(j)?;
        ConfigOption::new()
            .try_get_matches_from(hello(), ["hello"])
            .map_err(jail_error)
    })?;
    ensure!(who(&invocation) == Some("World"));
    ensure!(invocation.context.default_map().is_empty());
    Ok(())
}

#[cfg(any(unix, target_os = "redox"))]
#[rstest]
fn explicit_path_beats_implicit_file() -> Result<()> {
    let invocation = with_jail(|j| {
        jail_config_home(j)?;
        j.create_dir("xdg/hello")?;
        j.create_file("xdg/hello/config", "who = \"Implicit\"\n")?;
        j.create_file("alt.toml", "who = \"Explicit\"\n")?;
        ConfigOption::new()
            .try_get_matches_from(hello(), ["hello", "--config", "alt.toml"])
            .map_err(jail_error)
    })?;
    ensure!(who(&invocation) == Some("Explicit"));
    Ok(())
}

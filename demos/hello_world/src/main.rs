//! Hello World demo entry point: read defaults from the configuration file,
//! build the greeting and print it.

use std::sync::Arc;

use clap::CommandFactory;
use clap_config_file::ConfigFileError;
use tracing::debug;

use hello_world::cli::{Commands, HelloWorldCli, parse_from};
use hello_world::error::{HelloWorldError, Result};
use hello_world::message::{build_farewell, build_plan, write_lines};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    match run() {
        Err(HelloWorldError::Configuration(err)) => exit_with(err),
        other => other.map_err(color_eyre::eyre::Report::from),
    }
}

fn run() -> Result<()> {
    let parsed = parse_from(std::env::args_os())?;
    if let Some(path) = parsed.context.config_path() {
        debug!(%path, "configuration file consulted");
    }
    let cli = parsed.cli;
    let mut lines = vec![build_plan(&cli)?.message().to_owned()];
    if let Some(Commands::TakeLeave(command)) = &cli.command {
        lines.push(build_farewell(&cli, command)?);
    }
    write_lines(&mut std::io::stdout().lock(), &lines)?;
    Ok(())
}

/// Reports command-line and configuration failures the way `clap` does:
/// help and version exit 0, everything else exits with the usage code.
fn exit_with(err: Arc<ConfigFileError>) -> ! {
    err.exit(&mut hello_world::cli::config_option().attach(HelloWorldCli::command()))
}

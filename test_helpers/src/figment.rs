//! Running test setup inside a [`figment::Jail`].
//!
//! A jail switches the process into a fresh temporary directory and restores
//! the working directory and any environment variables it touched afterwards,
//! which makes it the natural home for tests that resolve relative
//! configuration paths or depend on `XDG_CONFIG_HOME`.

use anyhow::{Result, anyhow};

/// Runs `f` inside a jail and returns its output.
///
/// # Errors
///
/// Returns an error when the jail cannot be created or `f` fails.
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any displayable error into a [`figment::Error`] for use with `?`
/// inside a jail closure.
#[expect(
    clippy::needless_pass_by_value,
    reason = "errors are usually owned at the call site"
)]
pub fn jail_error(err: impl ToString) -> figment::Error {
    figment::Error::from(err.to_string())
}

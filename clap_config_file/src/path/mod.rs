//! Validation rules for the configuration option's path value.
//!
//! `clap` parses paths but does not check them, so [`PathRules`] is installed
//! as the option's value parser. A failed rule surfaces as a
//! [`clap::error::ErrorKind::ValueValidation`] error naming the option.

use std::ffi::OsStr;
use std::fs::Metadata;
use std::io;
use std::path::{Path, PathBuf};

use camino::Utf8PathBuf;
use clap::builder::TypedValueParser;
use clap::error::ErrorKind;
use clap::{Arg, Command};

/// Checks applied to the configuration file path before any provider runs.
///
/// The defaults accept a missing file, reject directories, require an
/// existing file to be readable and resolve the path to absolute form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag is an independent, user-facing validation switch"
)]
pub struct PathRules {
    /// The path must exist.
    pub exists: bool,
    /// The path may name a regular file.
    pub file_okay: bool,
    /// The path may name a directory.
    pub dir_okay: bool,
    /// An existing path must be writable.
    pub writable: bool,
    /// An existing file must be readable.
    pub readable: bool,
    /// Canonicalise the path (or make it absolute when it does not exist).
    pub resolve_path: bool,
}

impl Default for PathRules {
    fn default() -> Self {
        Self {
            exists: false,
            file_okay: true,
            dir_okay: false,
            writable: false,
            readable: true,
            resolve_path: true,
        }
    }
}

impl PathRules {
    /// Validate `path` against these rules, returning the path to hand to the
    /// provider.
    ///
    /// # Errors
    ///
    /// Returns a message describing the first rule the path breaks.
    pub fn check(&self, path: &Path) -> Result<PathBuf, String> {
        let shown = path.display();
        let meta = match std::fs::metadata(path) {
            Ok(meta) => Some(meta),
            Err(err) if err.kind() == io::ErrorKind::NotFound => None,
            Err(err) => return Err(format!("Path \"{shown}\" cannot be inspected: {err}.")),
        };
        match meta {
            None if self.exists => {
                let noun = if self.file_okay { "File" } else { "Directory" };
                return Err(format!("{noun} \"{shown}\" does not exist."));
            }
            None => {}
            Some(meta) => self.check_existing(path, &meta)?,
        }
        if self.resolve_path {
            resolve(path).map_err(|err| format!("Path \"{shown}\" cannot be resolved: {err}."))
        } else {
            Ok(path.to_path_buf())
        }
    }

    fn check_existing(&self, path: &Path, meta: &Metadata) -> Result<(), String> {
        let shown = path.display();
        if meta.is_dir() && !self.dir_okay {
            return Err(format!("File \"{shown}\" is a directory."));
        }
        if meta.is_file() && !self.file_okay {
            return Err(format!("Directory \"{shown}\" is a file."));
        }
        if self.writable && meta.permissions().readonly() {
            return Err(format!("File \"{shown}\" is not writable."));
        }
        if self.readable && meta.is_file() && std::fs::File::open(path).is_err() {
            return Err(format!("File \"{shown}\" is not readable."));
        }
        Ok(())
    }
}

/// Canonicalise an existing path, or make a missing one absolute.
fn resolve(path: &Path) -> io::Result<PathBuf> {
    if !path.exists() {
        return std::path::absolute(path);
    }
    #[cfg(windows)]
    {
        dunce::canonicalize(path)
    }
    #[cfg(not(windows))]
    {
        std::fs::canonicalize(path)
    }
}

impl TypedValueParser for PathRules {
    type Value = Utf8PathBuf;

    fn parse_ref(
        &self,
        cmd: &Command,
        arg: Option<&Arg>,
        value: &OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let option = arg.map_or_else(|| "...".to_owned(), ToString::to_string);
        let invalid = |message: String| {
            let mut cmd = cmd.clone();
            cmd.error(
                ErrorKind::ValueValidation,
                format!("Invalid value for '{option}': {message}"),
            )
        };
        if value.is_empty() {
            return Err(invalid("Path must not be empty.".to_owned()));
        }
        let checked = self.check(Path::new(value)).map_err(invalid)?;
        Utf8PathBuf::from_path_buf(checked).map_err(|path| {
            invalid(format!("Path \"{}\" is not valid UTF-8.", path.display()))
        })
    }
}

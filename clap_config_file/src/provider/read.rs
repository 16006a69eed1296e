//! Filesystem access for the file-format providers.

use std::io::{self, ErrorKind};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

/// Read `path` to a string through a capability on its parent directory.
///
/// Returns `Ok(None)` when the file or its parent directory does not exist,
/// or when the path names something other than a regular file.
pub(super) fn read_optional(path: &Utf8Path) -> io::Result<Option<String>> {
    let Some(name) = path.file_name() else {
        return Ok(None);
    };
    let dir = match Dir::open_ambient_dir(parent_or_dot(path), ambient_authority()) {
        Ok(dir) => dir,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    };
    match dir.metadata(name) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => return Ok(None),
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err),
    }
    dir.read_to_string(name).map(Some)
}

//! Shared filesystem helpers for resource reads and dump writes.

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};

/// Return the parent directory of `path`, falling back to `"."` when the path
/// has no parent or the parent is empty.
pub(crate) fn parent_or_dot(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

/// Open the parent directory of `path` via `cap-std` and extract the file name.
///
/// # Errors
///
/// Returns an [`std::io::Error`] if the file name cannot be determined or the
/// parent directory cannot be opened.
fn open_parent_dir_and_name(path: &Utf8Path) -> std::io::Result<(Dir, String)> {
    let parent = parent_or_dot(path);
    let file_name = path
        .file_name()
        .ok_or_else(|| std::io::Error::other(format!("cannot determine file name of '{path}'")))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, file_name.to_owned()))
}

/// Read `path` as UTF-8, terminating every line with `\n`.
pub(crate) fn read_lines(path: &Utf8Path) -> std::io::Result<String> {
    let (dir, name) = open_parent_dir_and_name(path)?;
    let raw = dir.read_to_string(&name)?;
    Ok(raw.lines().fold(String::with_capacity(raw.len() + 1), |mut text, line| {
        text.push_str(line);
        text.push('\n');
        text
    }))
}

/// Write `contents` to `path` as UTF-8, replacing any existing file.
pub(crate) fn write_text(path: &Utf8Path, contents: &str) -> std::io::Result<()> {
    let (dir, name) = open_parent_dir_and_name(path)?;
    dir.write(&name, contents.as_bytes())
}

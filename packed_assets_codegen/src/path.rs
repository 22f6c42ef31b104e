//! Logical asset paths.
use std::path::{Component, MAIN_SEPARATOR, Path, PathBuf};

use crate::{Error, Result};

/// Removes `strip_prefix` from the front of `path`.
///
/// The path is returned unchanged when it does not start with the prefix, and
/// an empty prefix is a no-op. No `.` or `..` segments are resolved, so
/// callers have to spell roots the same way every time or keys will not line
/// up.
#[must_use]
pub fn logical_path<'a>(path: &'a str, strip_prefix: &str) -> &'a str {
    path.strip_prefix(strip_prefix).unwrap_or(path)
}

/// Converts a discovered filesystem path into the string used for keys.
///
/// Keys always use `/` as the separator and carry no `.` segments, so
/// `./web/x` and `web/x` give the same key. `..` is kept as written.
///
/// # Errors
/// Returns [`Error::NonUtf8Path`] if the path is not valid UTF-8.
pub fn path_key(path: &Path) -> Result<String> {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        return Ok(".".to_owned());
    }
    let key = cleaned
        .to_str()
        .ok_or_else(|| Error::NonUtf8Path(path.to_path_buf()))?;
    if MAIN_SEPARATOR == '/' {
        Ok(key.to_owned())
    } else {
        Ok(key.replace(MAIN_SEPARATOR, "/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_matching_prefix() {
        assert_eq!(logical_path("a/b/c.txt", "a/"), "b/c.txt");
    }

    #[test]
    fn keeps_path_without_prefix() {
        assert_eq!(logical_path("a/b/c.txt", "zzz/"), "a/b/c.txt");
    }

    #[test]
    fn empty_prefix_is_noop() {
        assert_eq!(logical_path("a/b/c.txt", ""), "a/b/c.txt");
    }

    #[test]
    fn dot_segments_are_not_resolved() {
        assert_eq!(logical_path("./a/b.txt", "a/"), "./a/b.txt");
    }

    #[test]
    fn key_uses_forward_slashes() {
        let path = Path::new("templates").join("nested").join("hello");
        assert_eq!(path_key(&path).unwrap(), "templates/nested/hello");
    }

    #[test]
    fn key_drops_current_dir_segments() {
        assert_eq!(path_key(Path::new("./web/templates/x")).unwrap(), "web/templates/x");
        assert_eq!(path_key(Path::new("web/./templates/x")).unwrap(), "web/templates/x");
        assert_eq!(path_key(Path::new("../web/x")).unwrap(), "../web/x");
        assert_eq!(path_key(Path::new(".")).unwrap(), ".");
    }
}

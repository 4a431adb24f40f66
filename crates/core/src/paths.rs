//! Path expansion utilities

use std::path::{Path, PathBuf};

/// Expand a path, resolving `~` to the user's home directory
///
/// Paths that do not start with `~` are returned as-is. If no home directory
/// can be determined the path is also returned unchanged; the caller will
/// discover the miss when the file lookup fails.
pub fn expand_path<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if let Some(rest) = path_str.strip_prefix("~/") {
        match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        }
    } else if path_str == "~" {
        dirs::home_dir().unwrap_or_else(|| path.to_path_buf())
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() {
        let home = dirs::home_dir().expect("No home directory");

        let expanded = expand_path("~/.platformio/packages");
        assert_eq!(expanded, home.join(".platformio/packages"));

        let expanded = expand_path("~");
        assert_eq!(expanded, home);
    }

    #[test]
    fn test_expand_absolute() {
        let path = expand_path("/etc/hosts");
        assert_eq!(path, PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn test_expand_relative() {
        let path = expand_path("./foo/bar");
        assert_eq!(path, PathBuf::from("./foo/bar"));
    }
}

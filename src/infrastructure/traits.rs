//! I/O boundary traits for testability
//!
//! These traits abstract external I/O operations, allowing services
//! to be tested with mock implementations.

use std::io;
use std::path::Path;

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Create parent directories if needed.
    fn ensure_parent(&self, path: &Path) -> io::Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => self.create_dir_all(parent),
            _ => Ok(()),
        }
    }

    /// Read a text file as lines (line terminators removed, `\r\n` included).
    fn read_lines(&self, path: &Path) -> io::Result<Vec<String>> {
        Ok(self
            .read_to_string(path)?
            .lines()
            .map(str::to_string)
            .collect())
    }
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn given_crlf_file_when_read_lines_then_terminators_removed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("courses.csv");
        std::fs::write(&path, "A,Title A\r\n\r\nB,Title B").unwrap();

        let lines = RealFileSystem.read_lines(&path).unwrap();

        assert_eq!(lines, vec!["A,Title A", "", "B,Title B"]);
    }

    #[test]
    fn given_nested_path_when_ensure_parent_then_directories_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/advisor.toml");

        RealFileSystem.ensure_parent(&path).unwrap();

        assert!(RealFileSystem.exists(&dir.path().join("a/b")));
    }
}

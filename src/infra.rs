//! Infrastructure traits for abstracting I/O operations.
//!
//! Filesystem access and external process execution go through these traits so
//! the scanner, tool probes and config loader can be tested without touching the
//! real `file`/`size` binaries.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Trait for abstracting filesystem operations.
pub trait FileSystem {
    /// Resolve a path to its absolute, symlink-free form.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;

    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check whether a path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Trait for abstracting command execution.
///
/// Implementors only need [`CommandExecutor::output`]; the builder-style
/// [`CommandExecutor::execute`] is provided on top of it.
pub trait CommandExecutor {
    /// Execute a command and return its output (stdout, stderr, status).
    fn output(&self, cmd: &mut Command) -> io::Result<Output>;

    /// Execute a command built with a closure and return its output.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use codesize_diff::infra::{CommandExecutor, RealCommandExecutor};
    ///
    /// let executor = RealCommandExecutor;
    /// let output = executor.execute(|cmd| cmd.arg("--version"), "size")?;
    /// assert!(output.status.success());
    /// # Ok::<(), std::io::Error>(())
    /// ```
    fn execute<F>(&self, builder: F, program: &str) -> io::Result<Output>
    where
        F: FnOnce(&mut Command) -> &mut Command,
    {
        let mut cmd = Command::new(program);
        builder(&mut cmd);
        self.output(&mut cmd)
    }

    /// Resolve a program name (or path) to the executable that would run.
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }
}

impl<T: CommandExecutor + ?Sized> CommandExecutor for &T {
    fn output(&self, cmd: &mut Command) -> io::Result<Output> {
        (**self).output(cmd)
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        (**self).locate(program)
    }
}

/// Real command executor that delegates to std::process::Command.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealCommandExecutor;

impl CommandExecutor for RealCommandExecutor {
    fn output(&self, cmd: &mut Command) -> io::Result<Output> {
        cmd.output()
    }
}

/// Create an ExitStatus with the given exit code for use in test mocks.
///
/// This avoids spawning actual processes (like `Command::new("true")`) in tests.
#[cfg(all(test, unix))]
pub fn mock_exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code << 8) // Unix stores exit code in upper bits
}

#[cfg(all(test, windows))]
pub fn mock_exit_status(code: i32) -> std::process::ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    std::process::ExitStatus::from_raw(code as u32)
}


#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn test_real_filesystem_read_to_string_returns_contents() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        std::fs::write(&file_path, "top-n = 5\n").unwrap();

        let content = RealFileSystem.read_to_string(&file_path).unwrap();
        assert_eq!(content, "top-n = 5\n");
    }

    #[test]
    fn test_real_filesystem_canonicalize_returns_absolute_path() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("build");
        std::fs::create_dir_all(&nested).unwrap();

        let resolved = RealFileSystem.canonicalize(&nested.join(".")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("build"));
    }

    #[test]
    fn test_real_filesystem_canonicalize_missing_path_returns_error() {
        let result = RealFileSystem.canonicalize(Path::new("/nonexistent/build/tree"));
        assert!(result.is_err());
        assert!(!RealFileSystem.exists(Path::new("/nonexistent/build/tree")));
    }

    #[cfg(unix)]
    #[test]
    fn test_real_command_executor_execute_with_builder() {
        let output = RealCommandExecutor
            .execute(|cmd| cmd.arg("test_output"), "echo")
            .unwrap();

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("test_output"));
    }

    #[test]
    fn test_real_command_executor_nonexistent_command_returns_error() {
        let mut cmd = Command::new("nonexistent_command_xyz_123");
        assert!(RealCommandExecutor.output(&mut cmd).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_real_command_executor_locate_uses_path() {
        assert!(RealCommandExecutor.locate("sh").is_some());
        assert!(RealCommandExecutor.locate("nonexistent_command_xyz_123").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_mock_exit_status_preserves_code() {
        assert_eq!(mock_exit_status(3).code(), Some(3));
        assert!(mock_exit_status(0).success());
    }
}

//! Build tree scanning
//!
//! Walks one build tree, keeps ELF executables, and measures each with the
//! configured size tool. Files are processed sequentially in walk order.

use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use log::{debug, info, warn};
use walkdir::WalkDir;

use super::classifier::{FileClassifier, DEFAULT_CLASSIFIER};
use super::error::SizeError;
use super::parser::parse_size_output;
use super::record::{SizeRecord, SizeTable};
use crate::infra::{CommandExecutor, FileSystem, RealCommandExecutor, RealFileSystem};

/// Extension of intermediate object files, always skipped
pub const OBJECT_EXTENSION: &str = "o";

/// Exit code the size tool uses for "file format not recognized"
pub const UNRECOGNIZED_FORMAT_EXIT_CODE: i32 = 3;

/// How a scan invokes the external tools
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Size tool binary name or path
    pub size_tool: String,
    /// Arguments passed before the file path
    pub size_tool_args: Vec<String>,
    /// Classifier binary name or path
    pub classifier: String,
    /// Extra extensions skipped in addition to `.o`
    pub skip_extensions: Vec<String>,
    /// Draw a spinner on stderr while scanning
    pub show_progress: bool,
}

impl ScanOptions {
    /// Options for the given size tool with default classifier and no extra skips
    pub fn new(size_tool: impl Into<String>, size_tool_args: Vec<String>) -> Self {
        Self {
            size_tool: size_tool.into(),
            size_tool_args,
            classifier: DEFAULT_CLASSIFIER.to_string(),
            skip_extensions: Vec::new(),
            show_progress: false,
        }
    }
}

/// Outcome of measuring one candidate
enum Measurement {
    Measured(SizeRecord),
    Skipped(&'static str),
}

/// Scans build trees into [`SizeTable`]s
///
/// # Examples
///
/// ```no_run
/// use codesize_diff::size::{BuildTreeScanner, ScanOptions};
/// use std::path::Path;
///
/// let scanner = BuildTreeScanner::new(ScanOptions::new("size", vec!["-B".to_string()]));
/// let table = scanner.scan(Path::new("build-1"))?;
/// println!("{} executables, {} bytes", table.len(), table.total_dec());
/// # Ok::<(), codesize_diff::size::SizeError>(())
/// ```
pub struct BuildTreeScanner<
    FS: FileSystem = RealFileSystem,
    CE: CommandExecutor = RealCommandExecutor,
> {
    options: ScanOptions,
    fs: FS,
    cmd_executor: CE,
}

impl BuildTreeScanner {
    /// Scanner using the real filesystem and real processes
    pub fn new(options: ScanOptions) -> Self {
        Self::with_executors(options, RealFileSystem, RealCommandExecutor)
    }
}

impl<FS: FileSystem, CE: CommandExecutor> BuildTreeScanner<FS, CE> {
    /// Scanner with custom filesystem and command executor
    pub fn with_executors(options: ScanOptions, fs: FS, cmd_executor: CE) -> Self {
        Self {
            options,
            fs,
            cmd_executor,
        }
    }

    /// Options this scanner was built with
    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan one build tree.
    ///
    /// Symbolic links are not followed. Object files, non-executables and
    /// files the size tool does not recognize (exit code 3) are skipped. Any
    /// other size tool failure aborts the scan.
    pub fn scan(&self, root: &Path) -> Result<SizeTable, SizeError> {
        let root = self.fs.canonicalize(root).map_err(|source| SizeError::Io {
            context: format!("resolving build tree {}", root.display()),
            source,
        })?;

        let classifier =
            FileClassifier::with_executor(self.options.classifier.as_str(), &self.cmd_executor);
        let progress = self.progress_bar();
        let mut table = SizeTable::new();
        let mut candidates = 0usize;

        for entry in WalkDir::new(&root).follow_links(false).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            candidates += 1;

            let path = entry.path();
            match self.measure(&classifier, &root, path, &progress) {
                Ok(Measurement::Measured(record)) => {
                    if !record.is_consistent() {
                        warn!(
                            "{}: dec {} != text + data + bss ({})",
                            record.filename,
                            record.dec,
                            record.sections_total()
                        );
                    }
                    table.push(record);
                }
                Ok(Measurement::Skipped(reason)) => {
                    debug!("skipping {}: {}", path.display(), reason);
                }
                Err(e) => {
                    progress.finish_and_clear();
                    return Err(e);
                }
            }
        }

        progress.finish_and_clear();
        info!(
            "scanned {}: {} files, {} executables measured",
            root.display(),
            candidates,
            table.len()
        );
        Ok(table)
    }

    fn measure(
        &self,
        classifier: &FileClassifier<&CE>,
        root: &Path,
        path: &Path,
        progress: &ProgressBar,
    ) -> Result<Measurement, SizeError> {
        if self.is_skipped_extension(path) {
            return Ok(Measurement::Skipped("object or excluded extension"));
        }

        if !classifier.classify(path)?.is_measured() {
            return Ok(Measurement::Skipped("not an ELF executable"));
        }

        if let Some(name) = path.file_name() {
            progress.set_message(format!("Processing {}", name.to_string_lossy()));
            progress.tick();
        }

        let output = self
            .cmd_executor
            .execute(
                |cmd| cmd.args(&self.options.size_tool_args).arg(path),
                &self.options.size_tool,
            )
            .map_err(|source| SizeError::Io {
                context: format!("running {} on {}", self.options.size_tool, path.display()),
                source,
            })?;

        match output.status.code() {
            Some(0) => {}
            Some(UNRECOGNIZED_FORMAT_EXIT_CODE) => {
                return Ok(Measurement::Skipped("format not recognized by size tool"))
            }
            code => {
                return Err(SizeError::ToolInvocationFailed {
                    tool: self.options.size_tool.clone(),
                    path: path.to_path_buf(),
                    exit_code: code.unwrap_or(-1),
                })
            }
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_size_output(&stdout, root, path).map(Measurement::Measured)
    }

    fn is_skipped_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().map(|e| e.to_string_lossy()) else {
            return false;
        };
        ext == OBJECT_EXTENSION
            || self
                .options
                .skip_extensions
                .iter()
                .any(|skip| skip.trim_start_matches('.') == ext)
    }

    fn progress_bar(&self) -> ProgressBar {
        if self.options.show_progress {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        }
    }
}

/// Absolute form of a build tree path, for display before scanning
pub fn display_root(root: &Path) -> PathBuf {
    std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::infra::testing::ScriptedExecutor;
    use std::fs;
    use tempfile::TempDir;

    const HEADER: &str = "   text\t   data\t    bss\t    dec\t    hex\tfilename";

    /// `file` answers by name suffix; `size` reports the file's contents as dec.
    fn fake_tools() -> ScriptedExecutor {
        ScriptedExecutor::new(|program, args| {
            let path = args.last().cloned().unwrap_or_default();
            match program {
                "file" => {
                    let kind = if path.ends_with(".sh") {
                        "POSIX shell script, ASCII text executable"
                    } else if path.ends_with(".so") {
                        "ELF 64-bit LSB shared object, x86-64"
                    } else {
                        "ELF 64-bit LSB executable, x86-64, statically linked"
                    };
                    (0, format!("{}: {}\n", path, kind))
                }
                "size" => {
                    if path.contains("unknown") {
                        return (3, String::new());
                    }
                    if path.contains("broken") {
                        return (1, String::new());
                    }
                    let dec: u64 = fs::read_to_string(&path)
                        .ok()
                        .and_then(|s| s.trim().parse().ok())
                        .unwrap_or(0);
                    (
                        0,
                        format!(
                            "{}\n{:>7}\t{:>7}\t{:>7}\t{:>7}\t{:>7x}\t{}\n",
                            HEADER, dec, 0, 0, dec, dec, path
                        ),
                    )
                }
                other => panic!("unexpected program {}", other),
            }
        })
    }

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn scanner(executor: &ScriptedExecutor) -> BuildTreeScanner<RealFileSystem, &ScriptedExecutor> {
        BuildTreeScanner::with_executors(
            ScanOptions::new("size", vec!["-B".to_string()]),
            RealFileSystem,
            executor,
        )
    }

    #[test]
    fn test_scan_empty_tree_returns_empty_table() {
        let temp_dir = TempDir::new().unwrap();
        let executor = fake_tools();

        let table = scanner(&executor).scan(temp_dir.path()).unwrap();

        assert!(table.is_empty());
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn test_scan_collects_executables_with_root_relative_names() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "bin/a", "1000");
        write(temp_dir.path(), "tests/nested/b", "500");
        let executor = fake_tools();

        let table = scanner(&executor).scan(temp_dir.path()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("/bin/a").map(|r| r.dec), Some(1000));
        assert_eq!(table.get("/tests/nested/b").map(|r| r.dec), Some(500));
        assert_eq!(table.total_dec(), 1500);
    }

    #[test]
    fn test_scan_never_classifies_object_files() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "main.o", "100");
        write(temp_dir.path(), "main", "100");
        let executor = fake_tools();

        let table = scanner(&executor).scan(temp_dir.path()).unwrap();

        assert_eq!(table.len(), 1);
        assert!(table.iter().all(|r| !r.filename.ends_with(".o")));
        assert!(executor.calls().iter().all(|c| !c.ends_with(".o")));
    }

    #[test]
    fn test_scan_excludes_non_elf_and_non_executable() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "run.sh", "1");
        write(temp_dir.path(), "libfoo.so", "2");
        write(temp_dir.path(), "app", "3");
        let executor = fake_tools();

        let table = scanner(&executor).scan(temp_dir.path()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].filename, "/app");
        // size is only run on the qualifying file
        let size_calls = executor
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("size"))
            .count();
        assert_eq!(size_calls, 1);
    }

    #[test]
    fn test_scan_unrecognized_format_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        for i in 0..9 {
            write(temp_dir.path(), &format!("t{}", i), "10");
        }
        write(temp_dir.path(), "unknown-format", "10");
        let executor = fake_tools();

        let table = scanner(&executor).scan(temp_dir.path()).unwrap();
        assert_eq!(table.len(), 9);
    }

    #[test]
    fn test_scan_size_tool_failure_aborts() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "a", "10");
        write(temp_dir.path(), "broken", "10");
        let executor = fake_tools();

        let err = scanner(&executor).scan(temp_dir.path()).unwrap_err();
        match err {
            SizeError::ToolInvocationFailed {
                tool,
                path,
                exit_code,
            } => {
                assert_eq!(tool, "size");
                assert_eq!(exit_code, 1);
                assert!(path.ends_with("broken"));
            }
            other => panic!("expected ToolInvocationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_scan_passes_args_before_absolute_path() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "app", "10");
        let executor = fake_tools();

        scanner(&executor).scan(temp_dir.path()).unwrap();

        let root = fs::canonicalize(temp_dir.path()).unwrap();
        let expected = format!("size -B {}", root.join("app").display());
        assert!(executor.calls().contains(&expected));
    }

    #[test]
    fn test_scan_extra_skip_extensions_are_honored() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "app", "10");
        write(temp_dir.path(), "app.debug", "10");
        let executor = fake_tools();
        let mut options = ScanOptions::new("size", vec![]);
        options.skip_extensions = vec![".debug".to_string()];

        let table = BuildTreeScanner::with_executors(options, RealFileSystem, &executor)
            .scan(temp_dir.path())
            .unwrap();

        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_scan_does_not_follow_directory_symlinks() {
        let temp_dir = TempDir::new().unwrap();
        write(temp_dir.path(), "real/app", "10");
        std::os::unix::fs::symlink(temp_dir.path().join("real"), temp_dir.path().join("loop"))
            .unwrap();
        std::os::unix::fs::symlink(temp_dir.path(), temp_dir.path().join("real/up")).unwrap();
        let executor = fake_tools();

        let table = scanner(&executor).scan(temp_dir.path()).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.records()[0].filename, "/real/app");
    }

    #[test]
    fn test_scan_missing_root_is_io_error() {
        let executor = fake_tools();
        let result = scanner(&executor).scan(Path::new("/nonexistent/build/tree"));
        assert!(matches!(result, Err(SizeError::Io { .. })));
    }
}

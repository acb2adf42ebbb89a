//! Executable detection through the external `file` classifier

use std::path::Path;

use super::error::SizeError;
use crate::infra::{CommandExecutor, RealCommandExecutor};

/// Default classifier binary
pub const DEFAULT_CLASSIFIER: &str = "file";

/// Classification of one candidate file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// ELF image marked executable; its size is measured
    ElfExecutable,
    /// ELF but not an executable (relocatable, shared object, core)
    ElfOther,
    /// Anything else (scripts, archives, text)
    NotElf,
}

impl FileKind {
    /// Interpret a `file` description.
    ///
    /// A leading `"<path>: "` echo is ignored so a path containing "ELF" or
    /// "executable" cannot influence the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use codesize_diff::size::FileKind;
    ///
    /// let kind = FileKind::from_description(
    ///     "/b/hello: ELF 32-bit LSB executable, MIPS, version 1 (SYSV), statically linked",
    ///     Some("/b/hello"),
    /// );
    /// assert_eq!(kind, FileKind::ElfExecutable);
    /// ```
    pub fn from_description(description: &str, echoed_path: Option<&str>) -> Self {
        let description = echoed_path
            .and_then(|p| description.strip_prefix(p))
            .and_then(|rest| rest.strip_prefix(':'))
            .unwrap_or(description);

        match (
            description.contains("ELF"),
            description.contains("executable"),
        ) {
            (true, true) => Self::ElfExecutable,
            (true, false) => Self::ElfOther,
            (false, _) => Self::NotElf,
        }
    }

    /// Whether the file takes part in the size comparison
    pub fn is_measured(self) -> bool {
        self == Self::ElfExecutable
    }
}

/// Runs the classifier tool on candidate files
#[derive(Debug)]
pub struct FileClassifier<CE: CommandExecutor = RealCommandExecutor> {
    program: String,
    cmd_executor: CE,
}

impl FileClassifier {
    /// Classifier using the given binary and real process execution
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_executor(program, RealCommandExecutor)
    }
}

impl<CE: CommandExecutor> FileClassifier<CE> {
    /// Classifier with a custom command executor
    pub fn with_executor(program: impl Into<String>, cmd_executor: CE) -> Self {
        Self {
            program: program.into(),
            cmd_executor,
        }
    }

    /// Classifier binary name or path
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Classify a file. The classifier must exit zero.
    pub fn classify(&self, path: &Path) -> Result<FileKind, SizeError> {
        let output = self
            .cmd_executor
            .execute(|cmd| cmd.arg(path), &self.program)
            .map_err(|source| SizeError::Io {
                context: format!("running {} on {}", self.program, path.display()),
                source,
            })?;

        if !output.status.success() {
            return Err(SizeError::ClassifierFailed {
                path: path.to_path_buf(),
                exit_code: output.status.code().unwrap_or(-1),
            });
        }

        let description = String::from_utf8_lossy(&output.stdout);
        let echoed = path.to_string_lossy();
        Ok(FileKind::from_description(
            description.trim(),
            Some(echoed.as_ref()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_description_pie_executable_is_measured() {
        let kind = FileKind::from_description(
            "ELF 64-bit LSB pie executable, x86-64, version 1 (SYSV), dynamically linked",
            None,
        );
        assert_eq!(kind, FileKind::ElfExecutable);
        assert!(kind.is_measured());
    }

    #[test]
    fn test_from_description_elf_not_executable_is_excluded() {
        let shared = FileKind::from_description("ELF 64-bit LSB shared object, x86-64", None);
        let reloc = FileKind::from_description("ELF 32-bit LSB relocatable, MIPS", None);

        assert_eq!(shared, FileKind::ElfOther);
        assert_eq!(reloc, FileKind::ElfOther);
        assert!(!shared.is_measured());
    }

    #[test]
    fn test_from_description_executable_not_elf_is_excluded() {
        let kind = FileKind::from_description(
            "POSIX shell script, ASCII text executable",
            None,
        );
        assert_eq!(kind, FileKind::NotElf);
        assert!(!kind.is_measured());
    }

    #[test]
    fn test_from_description_ignores_echoed_path() {
        let path = "/b/ELF-executable-tests/readme.txt";
        let description = format!("{}: ASCII text", path);

        assert_eq!(
            FileKind::from_description(&description, Some(path)),
            FileKind::NotElf
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_classify_nonzero_exit_is_classifier_failure() {
        use crate::infra::testing::ScriptedExecutor;

        let executor = ScriptedExecutor::new(|_, _| (1, String::new()));
        let classifier = FileClassifier::with_executor("file", &executor);

        let err = classifier.classify(Path::new("/b/app")).unwrap_err();
        assert!(matches!(err, SizeError::ClassifierFailed { exit_code: 1, .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_classify_passes_path_to_classifier() {
        use crate::infra::testing::ScriptedExecutor;

        let executor = ScriptedExecutor::new(|program, args| {
            assert_eq!(program, "file");
            (0, format!("{}: ELF 32-bit LSB executable, MIPS\n", args[0]))
        });
        let classifier = FileClassifier::with_executor("file", &executor);

        let kind = classifier.classify(Path::new("/b/app")).unwrap();
        assert_eq!(kind, FileKind::ElfExecutable);
        assert_eq!(executor.calls(), vec!["file /b/app".to_string()]);
    }
}

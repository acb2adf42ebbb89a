//! Enhanced error types with contextual suggestions
//!
//! Provides structured error types that include:
//! - Actionable error messages
//! - Suggested fixes
//! - Proper exit codes for scripted comparison runs
//!
//! # Examples
//!
//! ```no_run
//! use codesize_diff::error::CodeSizeError;
//! use codesize_diff::size::{BuildTreeScanner, ScanOptions};
//! use std::path::Path;
//!
//! let scanner = BuildTreeScanner::new(ScanOptions::new("size", vec![]));
//! match scanner.scan(Path::new("build-1")).map_err(CodeSizeError::from) {
//!     Ok(table) => println!("{} executables", table.len()),
//!     Err(e) => {
//!         eprintln!("{}", e);
//!         std::process::exit(e.exit_code());
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::size::SizeError;

/// Top-level errors for a comparison run
#[derive(Error, Debug)]
pub enum CodeSizeError {
    /// External tool failed its `--version` probe
    #[error("Failed to run {tool} ({binary}): {reason}")]
    ToolProbeFailed {
        /// Role of the tool ("file classifier", "size tool")
        tool: String,
        /// Binary name or path that was probed
        binary: String,
        /// What went wrong
        reason: String,
    },

    /// Build tree path does not exist
    #[error("Build tree not found: {}", path.display())]
    BuildTreeNotFound {
        /// Path given on the command line
        path: PathBuf,
    },

    /// Configuration file could not be used
    #[error("Invalid configuration in {}: {reason}", path.display())]
    InvalidConfig {
        /// Path to config file
        path: PathBuf,
        /// What was wrong with it
        reason: String,
    },

    /// Scanning a build tree failed
    #[error("scan failed: {0}")]
    Scan(#[from] SizeError),

    /// Generic I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl CodeSizeError {
    /// Get actionable suggestion for resolving this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use codesize_diff::error::CodeSizeError;
    ///
    /// let error = CodeSizeError::ToolProbeFailed {
    ///     tool: "size tool".to_string(),
    ///     binary: "nanomips-elf-size".to_string(),
    ///     reason: "not found in PATH".to_string(),
    /// };
    ///
    /// let suggestion = error.suggestion().unwrap();
    /// assert!(suggestion.contains("nanomips-elf-size"));
    /// ```
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ToolProbeFailed { binary, .. } => Some(format!(
                "Check that '{}' is installed and that '{} --version' succeeds",
                binary, binary
            )),
            Self::BuildTreeNotFound { path } => Some(format!(
                "Ensure {} exists and points at a build directory",
                path.display()
            )),
            Self::InvalidConfig { .. } => Some(
                "Valid keys are top-n, classifier, chart-width and skip-extensions".to_string(),
            ),
            Self::Scan(SizeError::MalformedOutput { line, .. }) => Some(format!(
                "The size tool must print Berkeley format (try passing -B). Offending line: '{}'",
                line
            )),
            Self::Scan(SizeError::ToolInvocationFailed { tool, path, .. }) => Some(format!(
                "Run '{} {}' by hand to see the tool's error output",
                tool,
                path.display()
            )),
            Self::Scan(SizeError::ClassifierFailed { path, .. }) => Some(format!(
                "Run 'file {}' by hand to see why classification failed",
                path.display()
            )),
            Self::Scan(SizeError::Io { context, .. }) | Self::Io { context, .. } => Some(format!(
                "Check file permissions and that {} is possible",
                context
            )),
        }
    }

    /// Get appropriate exit code for this error.
    ///
    /// Follows sysexits.h conventions where one applies.
    ///
    /// # Examples
    ///
    /// ```
    /// use codesize_diff::error::CodeSizeError;
    /// use std::path::PathBuf;
    ///
    /// let error = CodeSizeError::BuildTreeNotFound { path: PathBuf::from("build-1") };
    /// assert_eq!(error.exit_code(), 66);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolProbeFailed { .. } => 127, // Command not found (Unix convention)
            Self::BuildTreeNotFound { .. } => 66, // EX_NOINPUT
            Self::InvalidConfig { .. } => 64,    // EX_USAGE
            Self::Scan(SizeError::MalformedOutput { .. }) => 65, // EX_DATAERR
            Self::Scan(SizeError::ToolInvocationFailed { .. }) => 1,
            Self::Scan(SizeError::ClassifierFailed { .. }) => 1,
            Self::Scan(SizeError::Io { .. }) | Self::Io { .. } => 74, // EX_IOERR
        }
    }
}

/// Error formatter with colors and structured output
pub struct ErrorFormatter;

impl ErrorFormatter {
    /// Format error with its cause chain and suggestions
    pub fn format(error: &anyhow::Error) -> String {
        use console::style;

        let mut output = String::new();

        output.push_str(&format!("{} {}\n", style("error:").red().bold(), error));

        let mut source = error.source();
        let mut indent = 1;
        while let Some(err) = source {
            output.push_str(&format!(
                "{}{} {}\n",
                "  ".repeat(indent),
                style("caused by:").yellow(),
                err
            ));
            source = err.source();
            indent += 1;
        }

        if let Some(cs_error) = error.downcast_ref::<CodeSizeError>() {
            if let Some(suggestion) = cs_error.suggestion() {
                output.push_str(&format!(
                    "\n{} {}\n",
                    style("help:").cyan().bold(),
                    suggestion
                ));
            }
        }

        output
    }

    /// Get exit code from error
    pub fn exit_code(error: &anyhow::Error) -> i32 {
        if let Some(cs_error) = error.downcast_ref::<CodeSizeError>() {
            cs_error.exit_code()
        } else {
            1 // Generic error
        }
    }
}

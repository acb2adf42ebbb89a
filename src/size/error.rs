//! Error types for build tree scanning and size output parsing

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning a build tree
#[derive(Error, Debug)]
pub enum SizeError {
    /// Size tool output did not have the expected Berkeley shape
    #[error("malformed size output: {reason}")]
    MalformedOutput {
        /// What was wrong with the output
        reason: String,
        /// The offending output line
        line: String,
    },

    /// Size tool exited with a code other than 0 or 3
    #[error("{tool} failed on {} with exit code {exit_code}", path.display())]
    ToolInvocationFailed {
        /// Size tool that was invoked
        tool: String,
        /// File the tool was run on
        path: PathBuf,
        /// Exit code (-1 when terminated by a signal)
        exit_code: i32,
    },

    /// File classifier exited non-zero
    #[error("file classifier failed on {} with exit code {exit_code}", path.display())]
    ClassifierFailed {
        /// File the classifier was run on
        path: PathBuf,
        /// Exit code (-1 when terminated by a signal)
        exit_code: i32,
    },

    /// I/O error with context
    #[error("I/O error: {context}")]
    Io {
        /// Context about where the error occurred
        context: String,
        #[source]
        /// IO error source
        source: std::io::Error,
    },
}

impl SizeError {
    pub(crate) fn malformed(reason: impl Into<String>, line: &str) -> Self {
        Self::MalformedOutput {
            reason: reason.into(),
            line: line.to_string(),
        }
    }
}

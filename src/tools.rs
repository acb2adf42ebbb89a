//! Tool detection and verification module
//!
//! Probes the two external tools a comparison depends on before any scanning
//! starts:
//! - the file classifier (`file` by default)
//! - the Berkeley-format size tool given on the command line

use crate::error::CodeSizeError;
use crate::fmt::{icon, WRENCH};
use crate::infra::{CommandExecutor, RealCommandExecutor};
use crate::size::DEFAULT_CLASSIFIER;
use console::style;
use thiserror::Error;

/// Errors that can occur while probing a tool
#[derive(Error, Debug)]
pub enum ToolError {
    /// I/O error during tool execution
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// `--version` exited non-zero
    #[error("--version exited with status {0}")]
    VersionFailed(i32),

    /// Binary could not be located
    #[error("not found in PATH")]
    NotFound,
}

/// An external tool with a version probe
///
/// # Examples
///
/// ```no_run
/// use codesize_diff::tools::Tool;
///
/// let size = Tool::new("size tool", "size");
/// match size.version() {
///     Ok(version) => println!("using {}", version),
///     Err(e) => eprintln!("size tool unusable: {}", e),
/// }
/// ```
#[derive(Debug)]
pub struct Tool<CE: CommandExecutor = RealCommandExecutor> {
    /// Role of the tool in the comparison
    pub name: &'static str,
    /// Binary name in PATH, or a path
    pub binary: String,
    /// Flag to get version
    pub version_flag: &'static str,
    cmd_executor: CE,
}

impl<CE: CommandExecutor> Tool<CE> {
    /// Create a new Tool with a custom command executor
    pub fn with_executor(name: &'static str, binary: impl Into<String>, cmd_executor: CE) -> Self {
        Self {
            name,
            binary: binary.into(),
            version_flag: "--version",
            cmd_executor,
        }
    }

    /// Check if the tool can be found (in PATH or as a path)
    pub fn is_installed(&self) -> bool {
        self.cmd_executor.locate(&self.binary).is_some()
    }

    /// First line of the tool's `--version` output
    pub fn version(&self) -> Result<String, ToolError> {
        let output = self
            .cmd_executor
            .execute(|cmd| cmd.arg(self.version_flag), &self.binary)?;

        if !output.status.success() {
            return Err(ToolError::VersionFailed(output.status.code().unwrap_or(-1)));
        }

        let version = String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or("")
            .trim()
            .to_string();

        Ok(version)
    }

    /// Locate the tool, then run its version probe
    pub fn check(&self) -> Result<String, ToolError> {
        if !self.is_installed() {
            return Err(ToolError::NotFound);
        }
        self.version()
    }

    /// Probe the tool, mapping failure to [`CodeSizeError::ToolProbeFailed`]
    pub fn probe(&self) -> Result<String, CodeSizeError> {
        self.check().map_err(|e| CodeSizeError::ToolProbeFailed {
            tool: self.name.to_string(),
            binary: self.binary.clone(),
            reason: e.to_string(),
        })
    }
}

impl Tool<RealCommandExecutor> {
    /// Create a new Tool with real command execution
    pub fn new(name: &'static str, binary: impl Into<String>) -> Self {
        Self::with_executor(name, binary, RealCommandExecutor)
    }
}

/// The classifier and size tool used for one comparison
pub struct ToolChain<CE: CommandExecutor = RealCommandExecutor> {
    /// File classifier
    pub classifier: Tool<CE>,
    /// Berkeley-format size tool
    pub size: Tool<CE>,
}

impl ToolChain<RealCommandExecutor> {
    /// Toolchain with the default classifier and the given size tool
    pub fn new(size_tool: impl Into<String>) -> Self {
        Self::with_executor(DEFAULT_CLASSIFIER, size_tool, RealCommandExecutor)
    }
}

impl<CE: CommandExecutor + Clone> ToolChain<CE> {
    /// Create a new ToolChain with a custom command executor
    pub fn with_executor(
        classifier: impl Into<String>,
        size_tool: impl Into<String>,
        cmd_executor: CE,
    ) -> Self {
        Self {
            classifier: Tool::with_executor("file classifier", classifier, cmd_executor.clone()),
            size: Tool::with_executor("size tool", size_tool, cmd_executor),
        }
    }
}

impl<CE: CommandExecutor> ToolChain<CE> {
    /// Probe both tools, printing their status.
    ///
    /// Fails on the first tool that cannot be located or whose `--version`
    /// does not exit zero.
    pub fn check_all(&self) -> Result<(), CodeSizeError> {
        println!("\n{} Checking tools...", icon(WRENCH));

        for tool in [&self.classifier, &self.size] {
            match tool.probe() {
                Ok(version) => {
                    println!(
                        "   {} {} - {}",
                        style("✓").green(),
                        style(tool.name).bold(),
                        style(version).dim()
                    );
                }
                Err(e) => {
                    println!(
                        "   {} {} - {}",
                        style("✗").red(),
                        style(tool.name).bold(),
                        style(&tool.binary).red()
                    );
                    return Err(e);
                }
            }
        }

        println!();
        Ok(())
    }
}

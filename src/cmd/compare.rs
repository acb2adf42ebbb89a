//! Compare command implementation
//!
//! Scans two build trees, joins their size tables on filename and prints the
//! summary and top-N charts.

use anyhow::Result;
use console::style;
use log::info;
use std::path::{Path, PathBuf};

use crate::args::normalize_size_tool_args;
use crate::config::{CompareConfig, ConfigLoader};
use crate::diff::SizeComparison;
use crate::error::CodeSizeError;
use crate::fmt::{icon, MICROSCOPE};
use crate::infra::{CommandExecutor, RealCommandExecutor, RealFileSystem};
use crate::report::Reporter;
use crate::size::scanner::display_root;
use crate::size::{BuildTreeScanner, ScanOptions};
use crate::tools::ToolChain;

/// Everything the command line supplies for one comparison
#[derive(Debug, Clone, Default)]
pub struct CompareOptions {
    /// First ("before") build tree
    pub build_tree_1: PathBuf,
    /// Second ("after") build tree
    pub build_tree_2: PathBuf,
    /// Berkeley-format size tool
    pub size_tool: String,
    /// Size tool arguments as typed, before normalization
    pub size_tool_args: Vec<String>,
    /// Explicit config file; otherwise `.codesize-diff.toml` in the working directory
    pub config_path: Option<PathBuf>,
    /// `--top` override
    pub top_n: Option<usize>,
    /// `--classifier` override
    pub classifier: Option<String>,
    /// `--chart-width` override
    pub chart_width: Option<usize>,
    /// `--no-chart`
    pub no_chart: bool,
}

impl CompareOptions {
    /// Options for two trees and a size tool, everything else default
    pub fn new(
        build_tree_1: impl Into<PathBuf>,
        build_tree_2: impl Into<PathBuf>,
        size_tool: impl Into<String>,
        size_tool_args: Vec<String>,
    ) -> Self {
        Self {
            build_tree_1: build_tree_1.into(),
            build_tree_2: build_tree_2.into(),
            size_tool: size_tool.into(),
            size_tool_args,
            ..Self::default()
        }
    }

    /// Config file settings with command-line overrides applied
    pub fn resolve_config(&self) -> Result<CompareConfig, CodeSizeError> {
        let (mut config, source) = match &self.config_path {
            Some(path) => (ConfigLoader::load_file(path)?, path.clone()),
            None => {
                let cwd = std::env::current_dir().map_err(|source| CodeSizeError::Io {
                    context: "reading the working directory".to_string(),
                    source,
                })?;
                (ConfigLoader::load(&cwd)?, PathBuf::from("command line"))
            }
        };
        self.apply_overrides(&mut config);

        config
            .validate()
            .map_err(|reason| CodeSizeError::InvalidConfig {
                path: source,
                reason,
            })?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut CompareConfig) {
        if let Some(top_n) = self.top_n {
            config.top_n = top_n;
        }
        if let Some(classifier) = &self.classifier {
            config.classifier = classifier.clone();
        }
        if let Some(chart_width) = self.chart_width {
            config.chart_width = chart_width;
        }
    }
}

/// Compare the code size of two build trees
///
/// # Examples
///
/// ```no_run
/// use codesize_diff::cmd::compare::{cmd_compare, CompareOptions};
///
/// let options = CompareOptions::new("build-1", "build-2", "size", vec!["B".to_string()]);
/// cmd_compare(&options)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The config file is invalid
/// - Either build tree doesn't exist
/// - The classifier or size tool fails its `--version` probe
/// - Scanning either tree fails
pub fn cmd_compare(options: &CompareOptions) -> Result<()> {
    let config = options.resolve_config()?;
    let show_progress = console::Term::stderr().is_term();
    run_compare(options, &config, RealCommandExecutor, show_progress)?;
    Ok(())
}

fn run_compare<CE: CommandExecutor + Clone>(
    options: &CompareOptions,
    config: &CompareConfig,
    cmd_executor: CE,
    show_progress: bool,
) -> Result<SizeComparison> {
    let size_tool_args = normalize_size_tool_args(&options.size_tool_args);

    println!(
        "First  build -> data1: {}",
        display_root(&options.build_tree_1).display()
    );
    println!(
        "Second build -> data2: {}",
        display_root(&options.build_tree_2).display()
    );
    println!("Size tool: {}", options.size_tool);
    println!("Size tool args: [{}]", size_tool_args.join(", "));

    ensure_build_tree(&options.build_tree_1)?;
    ensure_build_tree(&options.build_tree_2)?;

    ToolChain::with_executor(
        config.classifier.as_str(),
        options.size_tool.as_str(),
        cmd_executor.clone(),
    )
    .check_all()?;

    let scan_options = ScanOptions {
        size_tool: options.size_tool.clone(),
        size_tool_args,
        classifier: config.classifier.clone(),
        skip_extensions: config.skip_extensions.clone(),
        show_progress,
    };
    let scanner = BuildTreeScanner::with_executors(scan_options, RealFileSystem, cmd_executor);

    println!("{} {}", icon(MICROSCOPE), style("Collecting data for build 1").bold());
    let before = scanner.scan(&options.build_tree_1).map_err(CodeSizeError::from)?;

    println!("{} {}", icon(MICROSCOPE), style("Collecting data for build 2").bold());
    let after = scanner.scan(&options.build_tree_2).map_err(CodeSizeError::from)?;

    let comparison = SizeComparison::compute(&before, &after);
    info!(
        "compared {} files present in both builds",
        comparison.records().len()
    );

    Reporter::new(config.top_n, config.chart_width, !options.no_chart).print(&comparison);
    Ok(comparison)
}

fn ensure_build_tree(path: &Path) -> Result<(), CodeSizeError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(CodeSizeError::BuildTreeNotFound {
            path: path.to_path_buf(),
        })
    }
}

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use std::path::PathBuf;
use std::process;

use codesize_diff::cmd::{self, CompareOptions};
use codesize_diff::fmt::NO_EMOJI_ENV;

/// Code size comparison between two build trees
///
/// Measures every ELF executable in both trees with a Berkeley-format size
/// tool, then reports total savings or regression and the files that changed
/// the most.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// First ("before") build tree
    #[arg(value_name = "BUILD_TREE_1", required_unless_present = "completions")]
    build_tree_1: Option<PathBuf>,

    /// Second ("after") build tree
    #[arg(value_name = "BUILD_TREE_2", required_unless_present = "completions")]
    build_tree_2: Option<PathBuf>,

    /// Berkeley-format size tool, e.g. size or nanomips-elf-size
    #[arg(value_name = "SIZE_TOOL", required_unless_present = "completions")]
    size_tool: Option<String>,

    /// Arguments for the size tool; bare letters get a leading '-'
    #[arg(
        value_name = "SIZE_TOOL_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    size_tool_args: Vec<String>,

    /// Files shown per chart [default: 20]
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// File classifier binary [default: file]
    #[arg(long, value_name = "BINARY")]
    classifier: Option<String>,

    /// Chart bar width in columns [default: 50]
    #[arg(long, value_name = "COLUMNS")]
    chart_width: Option<usize>,

    /// Print the summary and counts only
    #[arg(long)]
    no_chart: bool,

    /// Config file (defaults to .codesize-diff.toml in the working directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long)]
    no_emoji: bool,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

impl Cli {
    fn compare_options(self) -> Option<CompareOptions> {
        Some(CompareOptions {
            build_tree_1: self.build_tree_1?,
            build_tree_2: self.build_tree_2?,
            size_tool: self.size_tool?,
            size_tool_args: self.size_tool_args,
            config_path: self.config,
            top_n: self.top,
            classifier: self.classifier,
            chart_width: self.chart_width,
            no_chart: self.no_chart,
        })
    }
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    if cli.no_emoji {
        std::env::set_var(NO_EMOJI_ENV, "1");
    }

    if let Some(shell) = cli.completions {
        cmd::cmd_completions(shell, &mut Cli::command());
        return;
    }

    let result = match cli.compare_options() {
        Some(options) => cmd::cmd_compare(&options),
        // clap enforces the positionals whenever --completions is absent
        None => Cli::command()
            .error(
                clap::error::ErrorKind::MissingRequiredArgument,
                "BUILD_TREE_1, BUILD_TREE_2 and SIZE_TOOL are required",
            )
            .exit(),
    };

    if let Err(e) = result {
        use codesize_diff::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}

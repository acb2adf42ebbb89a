//! Completions flag implementation
//!
//! Handles `codesize-diff --completions <SHELL>`, which prints a shell
//! completion script for the command line definition.

use clap::Command;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Binary name completions are generated for
pub const BIN_NAME: &str = "codesize-diff";

/// Generate a shell completion script on stdout
///
/// # Examples
///
/// ```bash
/// # Bash
/// codesize-diff --completions bash > /etc/bash_completion.d/codesize-diff
///
/// # Zsh
/// codesize-diff --completions zsh > ~/.zfunc/_codesize-diff
///
/// # Fish
/// codesize-diff --completions fish > ~/.config/fish/completions/codesize-diff.fish
/// ```
pub fn cmd_completions(shell: Shell, cmd: &mut Command) {
    write_completions(shell, cmd, &mut std::io::stdout());
}

/// Write a completion script to any writer
pub fn write_completions<W: Write>(shell: Shell, cmd: &mut Command, out: &mut W) {
    generate(shell, cmd, BIN_NAME, out);
}

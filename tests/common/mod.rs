//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - Fake `file` and `size` tools written as shell scripts
//! - Build tree fixtures whose files carry their own sizes
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures::*;
//!
//! let tools = FakeTools::install().unwrap();
//! let build = build_tree(&[("bin/app", 1000)]).unwrap();
//! ```

pub mod fixtures;

use assert_cmd::Command;

/// Helper to get the codesize-diff binary command
#[allow(dead_code)]
pub fn get_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_codesize-diff"));
    cmd.env("NO_EMOJI", "1").env_remove("RUST_LOG");
    cmd
}

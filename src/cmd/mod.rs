//! Command handlers for the codesize-diff CLI
//!
//! The binary has a single operation (comparing two build trees) plus shell
//! completion generation.

pub mod compare;
pub mod completions;

pub use compare::{cmd_compare, CompareOptions};
pub use completions::cmd_completions;

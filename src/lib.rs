#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! codesize-diff library
//!
//! Compares the code size of executables in two build trees. Each tree is
//! walked, every ELF executable is measured with a Berkeley-format `size`
//! tool, and the two tables are joined on root-relative filename.
//!
//! # Basic Example
//!
//! Diffing two size tables:
//!
//! ```
//! use codesize_diff::diff::{Direction, SizeComparison};
//! use codesize_diff::size::{SizeRecord, SizeTable};
//!
//! let record = |name: &str, dec: u64| SizeRecord {
//!     text: dec,
//!     data: 0,
//!     bss: 0,
//!     dec,
//!     hex: format!("{:x}", dec),
//!     filename: name.to_string(),
//! };
//! let before: SizeTable = vec![record("/bin/a", 1000), record("/bin/b", 500)].into_iter().collect();
//! let after: SizeTable = vec![record("/bin/a", 800), record("/bin/b", 500)].into_iter().collect();
//!
//! let comparison = SizeComparison::compute(&before, &after);
//! assert_eq!(comparison.summary().delta, 200);
//! assert_eq!(comparison.summary().direction(), Direction::Savings);
//! assert_eq!(comparison.top_improvements(20)[0].filename, "/bin/a");
//! ```
//!
//! # Advanced Example: Parsing size output
//!
//! ```
//! use codesize_diff::size::parse_size_output;
//! use std::path::Path;
//!
//! let output = concat!(
//!     "   text\t   data\t    bss\t    dec\t    hex\tfilename\n",
//!     "   1200\t    100\t     20\t   1320\t    528\t/work/build-1/bin/app\n",
//! );
//! let root = Path::new("/work/build-1");
//! let record = parse_size_output(output, root, &root.join("bin/app"))?;
//! assert_eq!(record.filename, "/bin/app");
//! assert_eq!(record.dec, 1320);
//! # Ok::<(), codesize_diff::size::SizeError>(())
//! ```

/// Size tool argument normalization
pub mod args;
/// Command handlers for CLI operations
pub mod cmd;
/// Configuration file loading
pub mod config;
/// Joining and ranking two size tables
pub mod diff;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Shared formatting utilities
pub mod fmt;
/// Infrastructure traits for filesystem and command execution
pub mod infra;
/// Summary and chart rendering
pub mod report;
/// Build tree scanning and size output parsing
pub mod size;
/// Tool detection and version checking
pub mod tools;

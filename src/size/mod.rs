//! Build tree size collection
//!
//! Turns a build tree into a [`SizeTable`] by classifying every file with an
//! external `file`-style tool and measuring ELF executables with a
//! Berkeley-format `size` tool.

pub mod classifier;
pub mod error;
pub mod parser;
pub mod record;
pub mod scanner;

pub use classifier::{FileClassifier, FileKind, DEFAULT_CLASSIFIER};
pub use error::SizeError;
pub use parser::{normalize_filename, parse_size_output};
pub use record::{SizeRecord, SizeTable};
pub use scanner::{BuildTreeScanner, ScanOptions, OBJECT_EXTENSION, UNRECOGNIZED_FORMAT_EXIT_CODE};

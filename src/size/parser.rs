//! Berkeley `size` output parsing
//!
//! Expected shape (GNU binutils, `size -B`):
//!
//! ```text
//!    text    data     bss     dec     hex filename
//!     164       0       0     164      a4 /abs/build-1/bin/hello
//! ```
//!
//! Columns are tab-separated with space padding; only the second line carries
//! data.

use std::path::{Component, Path};

use super::error::SizeError;
use super::record::SizeRecord;

/// Parse one size tool invocation into a [`SizeRecord`].
///
/// `root` is the canonical build root used to turn the reported filename into
/// a build-relative key. `scanned` is the path that was passed to the tool; it
/// stands in for the filename column when the tool omits it.
///
/// # Errors
///
/// Returns [`SizeError::MalformedOutput`] when the data line is missing, has
/// fewer than five tab-separated fields, or a section column is not an integer.
///
/// # Examples
///
/// ```
/// use codesize_diff::size::parse_size_output;
/// use std::path::Path;
///
/// let output = concat!(
///     "   text\t   data\t    bss\t    dec\t    hex\tfilename\n",
///     "   1000\t    200\t     24\t   1224\t    4c8\t/work/build-1/bin/app\n",
/// );
/// let root = Path::new("/work/build-1");
/// let record = parse_size_output(output, root, &root.join("bin/app")).unwrap();
///
/// assert_eq!(record.dec, 1224);
/// assert_eq!(record.filename, "/bin/app");
/// ```
pub fn parse_size_output(
    output: &str,
    root: &Path,
    scanned: &Path,
) -> Result<SizeRecord, SizeError> {
    let mut lines = output.lines();
    if lines.next().is_none() {
        return Err(SizeError::malformed("empty output", ""));
    }
    let line = lines
        .next()
        .ok_or_else(|| SizeError::malformed("missing size line after header", ""))?
        .trim_end_matches('\r');

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 5 {
        return Err(SizeError::malformed(
            format!(
                "expected at least 5 tab-separated fields, found {}",
                fields.len()
            ),
            line,
        ));
    }

    let text = parse_section(fields[0], "text", line)?;
    let data = parse_section(fields[1], "data", line)?;
    let bss = parse_section(fields[2], "bss", line)?;
    let dec = parse_section(fields[3], "dec", line)?;
    let hex = fields[4].trim().to_string();

    let reported = fields[5..].join("\t");
    let reported = reported.trim();
    let filename = if reported.is_empty() {
        normalize_filename(&scanned.to_string_lossy(), root)
    } else {
        normalize_filename(reported, root)
    };

    Ok(SizeRecord {
        text,
        data,
        bss,
        dec,
        hex,
        filename,
    })
}

fn parse_section(field: &str, column: &str, line: &str) -> Result<u64, SizeError> {
    let trimmed = field.trim();
    trimmed.parse::<u64>().map_err(|_| {
        SizeError::malformed(
            format!("{} column is not an integer: '{}'", column, trimmed),
            line,
        )
    })
}

/// Turn a reported path into the join key for a build.
///
/// Paths under `root` become root-relative with a leading `/` and `/`
/// separators, so the same binary in two build trees maps to the same key.
/// Anything else is kept verbatim.
///
/// # Examples
///
/// ```
/// use codesize_diff::size::normalize_filename;
/// use std::path::Path;
///
/// let root = Path::new("/home/ci/build-2");
/// assert_eq!(normalize_filename("/home/ci/build-2/tests/t1", root), "/tests/t1");
/// assert_eq!(normalize_filename("/elsewhere/t1", root), "/elsewhere/t1");
/// ```
pub fn normalize_filename(reported: &str, root: &Path) -> String {
    match Path::new(reported).strip_prefix(root) {
        Ok(relative) => {
            let parts: Vec<String> = relative
                .components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect();
            format!("/{}", parts.join("/"))
        }
        Err(_) => reported.to_string(),
    }
}

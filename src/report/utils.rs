//! Shared helpers for report formatting

/// Format number with thousand separators
///
/// # Examples
///
/// ```
/// use codesize_diff::report::utils::format_number;
///
/// assert_eq!(format_number(1234567), "1,234,567");
/// ```
pub fn format_number(n: u64) -> String {
    n.to_string()
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or("?"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Format a signed byte count with thousand separators
pub fn format_signed(n: i64) -> String {
    if n < 0 {
        format!("-{}", format_number(n.unsigned_abs()))
    } else {
        format_number(n as u64)
    }
}

/// Label for a savings percentage (positive internally, shown as a decrease)
///
/// # Examples
///
/// ```
/// use codesize_diff::report::utils::{savings_label, regression_label};
///
/// assert_eq!(savings_label(20.0), "-20.00%");
/// assert_eq!(regression_label(-12.345), "+12.35%");
/// ```
pub fn savings_label(percentage: f64) -> String {
    format!("-{:.2}%", percentage)
}

/// Label for a regression percentage (negative internally, shown as an increase)
pub fn regression_label(percentage: f64) -> String {
    format!("+{:.2}%", -percentage)
}

const ELLIPSIS: &str = "...";

/// Shorten a path to at most `max_chars` characters, keeping its tail
///
/// # Examples
///
/// ```
/// use codesize_diff::report::utils::truncate_path;
///
/// assert_eq!(truncate_path("/short", 10), "/short");
/// assert_eq!(truncate_path("/SingleSource/Benchmarks/Misc/fbench", 16), "...s/Misc/fbench");
/// ```
pub fn truncate_path(path: &str, max_chars: usize) -> String {
    let len = path.chars().count();
    if len <= max_chars {
        return path.to_string();
    }
    if max_chars <= ELLIPSIS.len() {
        // no room for an ellipsis, keep the tail only
        return path.chars().skip(len - max_chars).collect();
    }
    let keep = max_chars - ELLIPSIS.len();
    let tail: String = path.chars().skip(len - keep).collect();
    format!("{}{}", ELLIPSIS, tail)
}

//! Shared formatting utilities for size display and console output

use console::Emoji;

/// Wrench emoji for tool checks
pub const WRENCH: Emoji = Emoji("🔧", "*");

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Chart emoji for metrics/statistics
pub const CHART: Emoji = Emoji("📊", "~");

/// Microscope emoji for scanning
pub const MICROSCOPE: Emoji = Emoji("🔍", ">>");

/// Warning emoji for caution/alerts
pub const WARNING: Emoji = Emoji("⚠️", "!");

/// Environment variable that switches emoji output to plain fallbacks
pub const NO_EMOJI_ENV: &str = "NO_EMOJI";

/// Emoji text, or its plain fallback when `NO_EMOJI` is set
///
/// # Examples
///
/// ```
/// use codesize_diff::fmt::{icon, CHECKMARK};
///
/// std::env::set_var("NO_EMOJI", "1");
/// assert_eq!(icon(CHECKMARK), "[OK]");
/// ```
pub fn icon(emoji: Emoji<'static, 'static>) -> &'static str {
    if std::env::var_os(NO_EMOJI_ENV).is_some() {
        emoji.1
    } else {
        emoji.0
    }
}

/// Format bytes as human-readable size string
///
/// # Examples
///
/// ```
/// use codesize_diff::fmt::format_bytes;
///
/// assert_eq!(format_bytes(512), "512 B");
/// assert_eq!(format_bytes(1024), "1.00 KB");
/// assert_eq!(format_bytes(1_048_576), "1.00 MB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

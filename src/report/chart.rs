//! Grouped horizontal bar charts for the ranked changes
//!
//! Each file gets a "before" and an "after" bar on a shared scale, annotated
//! with the byte counts and the signed percentage change.

use console::style;

use super::utils::{format_number, regression_label, savings_label, truncate_path};
use crate::diff::DiffRecord;

/// Widest filename label before truncation
const MAX_LABEL_WIDTH: usize = 40;

const BEFORE_GLYPH: char = '░';
const AFTER_GLYPH: char = '█';

/// Which ranking a chart shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Largest relative shrink first
    Savings,
    /// Largest relative growth first
    Regressions,
}

impl ChartKind {
    /// Chart title
    pub fn title(self) -> &'static str {
        match self {
            Self::Savings => "Savings",
            Self::Regressions => "Regressions",
        }
    }

    fn axis_label(self, n: usize) -> String {
        match self {
            Self::Savings => format!("Top {} savings (by percentage)", n),
            Self::Regressions => format!("Top {} regressions (by percentage)", n),
        }
    }

    fn percent_label(self, record: &DiffRecord) -> String {
        let Some(p) = record.percentage.value() else {
            return String::new();
        };
        match self {
            Self::Savings => savings_label(p),
            Self::Regressions => regression_label(p),
        }
    }
}

/// Bar length in columns for `value` on a scale where `max` fills `width`
fn bar_len(value: u64, max: u64, width: usize) -> usize {
    if max == 0 || value == 0 || width == 0 {
        return 0;
    }
    let len = (value as f64 * width as f64 / max as f64).round() as usize;
    len.clamp(1, width)
}

/// Render a chart for already-ranked rows.
///
/// Returns an empty string when `rows` is empty.
pub fn render_chart(kind: ChartKind, rows: &[&DiffRecord], width: usize) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let max = rows
        .iter()
        .map(|r| r.dec_before.max(r.dec_after))
        .max()
        .unwrap_or(0);
    let label_width = rows
        .iter()
        .map(|r| r.filename.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL_WIDTH);
    let percent_color = match kind {
        ChartKind::Savings => console::Color::Yellow,
        ChartKind::Regressions => console::Color::Blue,
    };

    let mut out = String::new();
    out.push_str(&format!("{}\n", style(kind.title()).bold().underlined()));
    out.push_str(&format!("{}\n", style(kind.axis_label(rows.len())).dim()));
    out.push_str(&format!(
        "{}\n",
        style("─".repeat(label_width + width + 30)).dim()
    ));

    for record in rows {
        let label = truncate_path(&record.filename, label_width);
        let before_bar: String = std::iter::repeat(BEFORE_GLYPH)
            .take(bar_len(record.dec_before, max, width))
            .collect();
        let after_bar: String = std::iter::repeat(AFTER_GLYPH)
            .take(bar_len(record.dec_after, max, width))
            .collect();

        out.push_str(&format!(
            "{:<lw$}  before {} {}\n",
            label,
            style(format!("{:<width$}", before_bar, width = width)).yellow(),
            style(format_number(record.dec_before)).yellow(),
            lw = label_width,
        ));
        out.push_str(&format!(
            "{:<lw$}  after  {} {}  {}\n",
            "",
            style(format!("{:<width$}", after_bar, width = width)).blue(),
            style(format_number(record.dec_after)).blue(),
            style(kind.percent_label(record)).fg(percent_color).bold(),
            lw = label_width,
        ));
    }

    out.push_str(&format!(
        "{}\n",
        style(format!(
            "Code size (bytes); a full bar is {} bytes",
            format_number(max)
        ))
        .dim()
    ));
    out
}

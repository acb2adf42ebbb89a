//! Console reporting of a size comparison
//!
//! Prints the aggregate summary, then one chart per ranking direction that has
//! at least one qualifying file.

pub mod chart;
pub mod utils;

pub use chart::{render_chart, ChartKind};

use console::style;

use crate::diff::{Direction, SizeComparison};
use crate::fmt::{format_bytes, icon, CHART, CHECKMARK, WARNING};
use utils::{format_number, format_signed};

/// Number of files shown per chart unless configured otherwise
pub const DEFAULT_TOP_N: usize = 20;

/// Default chart bar width in columns
pub const DEFAULT_CHART_WIDTH: usize = 50;

/// Renders a [`SizeComparison`] for the terminal
#[derive(Debug, Clone)]
pub struct Reporter {
    top_n: usize,
    chart_width: usize,
    show_charts: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N, DEFAULT_CHART_WIDTH, true)
    }
}

impl Reporter {
    /// Create a reporter
    pub fn new(top_n: usize, chart_width: usize, show_charts: bool) -> Self {
        Self {
            top_n,
            chart_width,
            show_charts,
        }
    }

    /// Print the full report to stdout
    pub fn print(&self, comparison: &SizeComparison) {
        print!("{}", self.render(comparison));
    }

    /// Render the full report
    pub fn render(&self, comparison: &SizeComparison) -> String {
        let mut out = render_summary(comparison);

        let improvements = comparison.improvements();
        out.push_str(&format!(
            "Num of percentage greater than zero: {}\n",
            improvements.len()
        ));
        if improvements.is_empty() {
            out.push_str("No savings in code size.\n");
        } else if self.show_charts {
            let n = self.top_n.min(improvements.len());
            out.push('\n');
            out.push_str(&render_chart(
                ChartKind::Savings,
                &improvements[..n],
                self.chart_width,
            ));
            out.push('\n');
        }

        let regressions = comparison.regressions();
        out.push_str(&format!(
            "Num of percentage less than zero: {}\n",
            regressions.len()
        ));
        if regressions.is_empty() {
            out.push_str("No regressions in code size.\n");
        } else if self.show_charts {
            let n = self.top_n.min(regressions.len());
            out.push('\n');
            out.push_str(&render_chart(
                ChartKind::Regressions,
                &regressions[..n],
                self.chart_width,
            ));
        }

        out
    }
}

/// Render the aggregate summary block
pub fn render_summary(comparison: &SizeComparison) -> String {
    let summary = comparison.summary();
    let rule = "#".repeat(15);

    let mut out = String::new();
    out.push_str(&format!("{} Results {}\n", rule, rule));
    out.push_str(&format!(
        "{} {} {} executables, {} bytes ({})\n",
        icon(CHART),
        style("First build: ").bold(),
        summary.rows_before,
        format_number(summary.total_before),
        format_bytes(summary.total_before)
    ));
    out.push_str(&format!(
        "{} {} {} executables, {} bytes ({})\n",
        icon(CHART),
        style("Second build:").bold(),
        summary.rows_after,
        format_number(summary.total_after),
        format_bytes(summary.total_after)
    ));

    match summary.direction() {
        Direction::Savings => out.push_str(&format!(
            "{} {}\n",
            icon(CHECKMARK),
            style("We have savings in code size!").green().bold()
        )),
        Direction::Regression => out.push_str(&format!(
            "{} {}\n",
            icon(WARNING),
            style("We have regression in code size!").red().bold()
        )),
    }
    out.push_str(&format!(
        "Savings: {} bytes\n",
        format_signed(summary.delta)
    ));
    out.push_str(&format!(
        "We have savings in {} files.\n",
        summary.improved
    ));
    out.push_str(&format!(
        "We have regression in {} files.\n",
        summary.regressed
    ));
    out.push_str(&format!("Unchanged: {} files.\n", summary.unchanged));
    out.push_str(&format!("{}\n", "#".repeat(39)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::{SizeRecord, SizeTable};

    fn table(entries: &[(&str, u64)]) -> SizeTable {
        entries
            .iter()
            .map(|(name, dec)| SizeRecord {
                text: *dec,
                data: 0,
                bss: 0,
                dec: *dec,
                hex: format!("{:x}", dec),
                filename: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_render_summary_reports_savings_and_tally() {
        console::set_colors_enabled(false);
        let cmp = SizeComparison::compute(
            &table(&[("a", 1000), ("b", 500)]),
            &table(&[("a", 800), ("b", 500), ("c", 100)]),
        );

        let text = render_summary(&cmp);

        assert!(text.contains("2 executables, 1,500 bytes"));
        assert!(text.contains("3 executables, 1,400 bytes"));
        assert!(text.contains("We have savings in code size!"));
        assert!(text.contains("Savings: 100 bytes"));
        assert!(text.contains("We have savings in 1 files."));
        assert!(text.contains("We have regression in 0 files."));
        assert!(text.contains("Unchanged: 1 files."));
    }

    #[test]
    fn test_render_summary_reports_regression_with_negative_savings() {
        console::set_colors_enabled(false);
        let cmp = SizeComparison::compute(&table(&[("a", 100)]), &table(&[("a", 250)]));

        let text = render_summary(&cmp);

        assert!(text.contains("We have regression in code size!"));
        assert!(text.contains("Savings: -150 bytes"));
        assert!(text.contains("We have regression in 1 files."));
    }

    #[test]
    fn test_render_without_regressions_prints_no_change_message() {
        console::set_colors_enabled(false);
        let cmp = SizeComparison::compute(&table(&[("a", 1000)]), &table(&[("a", 800)]));

        let text = Reporter::default().render(&cmp);

        assert!(text.contains("Savings\n"));
        assert!(text.contains("-20.00%"));
        assert!(text.contains("No regressions in code size."));
        assert!(!text.contains("Regressions\n"));
    }

    #[test]
    fn test_render_without_savings_prints_no_change_message() {
        console::set_colors_enabled(false);
        let cmp = SizeComparison::compute(&table(&[("a", 100)]), &table(&[("a", 100)]));

        let text = Reporter::default().render(&cmp);

        assert!(text.contains("No savings in code size."));
        assert!(text.contains("No regressions in code size."));
        assert!(!text.contains("by percentage"));
    }

    #[test]
    fn test_render_limits_chart_to_top_n() {
        console::set_colors_enabled(false);
        let before: Vec<(String, u64)> = (0..5).map(|i| (format!("/f{}", i), 100)).collect();
        let after: Vec<(String, u64)> = (0..5).map(|i| (format!("/f{}", i), 200 + i)).collect();
        let as_refs = |v: &[(String, u64)]| -> SizeTable {
            table(&v.iter().map(|(n, d)| (n.as_str(), *d)).collect::<Vec<_>>())
        };
        let cmp = SizeComparison::compute(&as_refs(&before), &as_refs(&after));

        let text = Reporter::new(3, 20, true).render(&cmp);

        assert!(text.contains("Num of percentage less than zero: 5"));
        assert!(text.contains("Top 3 regressions (by percentage)"));
        assert!(text.contains("/f4"));
        assert!(!text.contains("/f0"));
    }

    #[test]
    fn test_render_without_charts_keeps_counts() {
        console::set_colors_enabled(false);
        let cmp = SizeComparison::compute(&table(&[("a", 1000)]), &table(&[("a", 800)]));

        let text = Reporter::new(20, 50, false).render(&cmp);

        assert!(text.contains("Num of percentage greater than zero: 1"));
        assert!(!text.contains("by percentage"));
    }
}

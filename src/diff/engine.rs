//! Joining two size tables and ranking the changes

use std::collections::{HashMap, HashSet};

use log::warn;

use super::record::{signed_delta, Change, DiffRecord};
use crate::size::{SizeRecord, SizeTable};

/// Overall direction of the aggregate size change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Second build is smaller in total
    Savings,
    /// Second build is the same size or larger in total
    Regression,
}

/// Aggregate numbers for a comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSummary {
    /// Records scanned in the first build
    pub rows_before: usize,
    /// Records scanned in the second build
    pub rows_after: usize,
    /// Sum of `dec` over the whole first table
    pub total_before: u64,
    /// Sum of `dec` over the whole second table
    pub total_after: u64,
    /// `total_before - total_after`
    pub delta: i64,
    /// Joined files that shrank
    pub improved: usize,
    /// Joined files that grew
    pub regressed: usize,
    /// Joined files with identical size
    pub unchanged: usize,
}

impl SizeSummary {
    /// Savings when the second build's total is strictly smaller
    pub fn direction(&self) -> Direction {
        if self.delta > 0 {
            Direction::Savings
        } else {
            Direction::Regression
        }
    }
}

/// Result of comparing two builds
///
/// # Examples
///
/// ```
/// use codesize_diff::diff::{Direction, SizeComparison};
/// use codesize_diff::size::{SizeRecord, SizeTable};
///
/// fn rec(name: &str, dec: u64) -> SizeRecord {
///     SizeRecord { text: dec, data: 0, bss: 0, dec, hex: format!("{:x}", dec), filename: name.into() }
/// }
///
/// let before: SizeTable = vec![rec("/a", 1000), rec("/b", 500)].into_iter().collect();
/// let after: SizeTable = vec![rec("/a", 800), rec("/b", 500), rec("/c", 100)].into_iter().collect();
///
/// let cmp = SizeComparison::compute(&before, &after);
/// assert_eq!(cmp.summary().delta, 100);
/// assert_eq!(cmp.summary().direction(), Direction::Savings);
/// assert_eq!(cmp.top_improvements(20)[0].filename, "/a");
/// ```
#[derive(Debug, Clone)]
pub struct SizeComparison {
    summary: SizeSummary,
    records: Vec<DiffRecord>,
}

impl SizeComparison {
    /// Inner-join both tables on filename and compute deltas.
    ///
    /// Files present in only one build do not appear in the records but do
    /// count toward the aggregate totals. Joined records follow the order of
    /// the first table. If a filename repeats within a table, its first
    /// occurrence is used.
    pub fn compute(before: &SizeTable, after: &SizeTable) -> Self {
        let after_by_name = index_by_filename(after, "second");

        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for rec in before {
            if !seen.insert(rec.filename.as_str()) {
                warn!("duplicate filename {} in first build, ignoring", rec.filename);
                continue;
            }
            if let Some(other) = after_by_name.get(rec.filename.as_str()) {
                records.push(DiffRecord::new(rec.filename.clone(), rec.dec, other.dec));
            }
        }

        let count = |change: Change| records.iter().filter(|r| r.change() == change).count();
        let total_before = before.total_dec();
        let total_after = after.total_dec();
        let summary = SizeSummary {
            rows_before: before.len(),
            rows_after: after.len(),
            total_before,
            total_after,
            delta: signed_delta(total_before, total_after),
            improved: count(Change::Improved),
            regressed: count(Change::Regressed),
            unchanged: count(Change::Unchanged),
        };

        Self { summary, records }
    }

    /// Aggregate numbers
    pub fn summary(&self) -> &SizeSummary {
        &self.summary
    }

    /// Joined records in first-table order
    pub fn records(&self) -> &[DiffRecord] {
        &self.records
    }

    /// All records with a defined percentage, sorted by percentage.
    ///
    /// Descending puts the largest relative shrink first, ascending the
    /// largest relative growth. Ties keep join order.
    pub fn ranked(&self, descending: bool) -> Vec<&DiffRecord> {
        let mut ranked: Vec<(&DiffRecord, f64)> = self
            .records
            .iter()
            .filter_map(|r| r.percentage.value().map(|p| (r, p)))
            .collect();

        if descending {
            ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        } else {
            ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        }
        ranked.into_iter().map(|(r, _)| r).collect()
    }

    /// Files with a positive percentage, best relative savings first
    pub fn improvements(&self) -> Vec<&DiffRecord> {
        self.ranked(true)
            .into_iter()
            .filter(|r| r.percentage.value().is_some_and(|p| p > 0.0))
            .collect()
    }

    /// Files with a negative percentage, worst relative regression first
    pub fn regressions(&self) -> Vec<&DiffRecord> {
        self.ranked(false)
            .into_iter()
            .filter(|r| r.percentage.value().is_some_and(|p| p < 0.0))
            .collect()
    }

    /// At most `n` best relative savings
    pub fn top_improvements(&self, n: usize) -> Vec<&DiffRecord> {
        let mut top = self.improvements();
        top.truncate(n);
        top
    }

    /// At most `n` worst relative regressions
    pub fn top_regressions(&self, n: usize) -> Vec<&DiffRecord> {
        let mut top = self.regressions();
        top.truncate(n);
        top
    }
}

fn index_by_filename<'a>(table: &'a SizeTable, label: &str) -> HashMap<&'a str, &'a SizeRecord> {
    let mut index = HashMap::with_capacity(table.len());
    for rec in table {
        if index.contains_key(rec.filename.as_str()) {
            warn!(
                "duplicate filename {} in {} build, ignoring",
                rec.filename, label
            );
            continue;
        }
        index.insert(rec.filename.as_str(), rec);
    }
    index
}

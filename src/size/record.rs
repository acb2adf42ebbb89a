//! Size records and tables produced by scanning one build tree

/// Section sizes of one executable as reported by the size tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeRecord {
    /// Code section size in bytes
    pub text: u64,
    /// Initialized data size in bytes
    pub data: u64,
    /// Uninitialized data size in bytes
    pub bss: u64,
    /// Total of text, data and bss
    pub dec: u64,
    /// Hexadecimal rendering of `dec`, carried through as reported
    pub hex: String,
    /// Build-root relative path, used as the join key between builds
    pub filename: String,
}

impl SizeRecord {
    /// Sum of the individual sections
    pub fn sections_total(&self) -> u64 {
        self.text + self.data + self.bss
    }

    /// Whether `dec` agrees with the individual sections
    pub fn is_consistent(&self) -> bool {
        self.sections_total() == self.dec
    }
}

/// Ordered collection of size records for one build tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SizeTable {
    records: Vec<SizeRecord>,
}

impl SizeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: SizeRecord) {
        self.records.push(record);
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no executable qualified during the scan
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in scan order
    pub fn records(&self) -> &[SizeRecord] {
        &self.records
    }

    /// Iterate records in scan order
    pub fn iter(&self) -> std::slice::Iter<'_, SizeRecord> {
        self.records.iter()
    }

    /// Sum of `dec` over all records
    pub fn total_dec(&self) -> u64 {
        self.records
            .iter()
            .fold(0u64, |total, r| total.saturating_add(r.dec))
    }

    /// Look up a record by its filename key
    pub fn get(&self, filename: &str) -> Option<&SizeRecord> {
        self.records.iter().find(|r| r.filename == filename)
    }
}

impl FromIterator<SizeRecord> for SizeTable {
    fn from_iter<I: IntoIterator<Item = SizeRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SizeTable {
    type Item = &'a SizeRecord;
    type IntoIter = std::slice::Iter<'a, SizeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

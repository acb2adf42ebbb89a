//! Per-file diff records

/// Relative size change of one file
///
/// Positive values are savings (the file shrank). A file whose "before" size is
/// zero has no meaningful relative change and is `Undefined`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Percentage {
    /// `diff * 100 / dec_before`
    Defined(f64),
    /// `dec_before` was zero
    Undefined,
}

impl Percentage {
    /// Relative change for a byte delta against the "before" size
    ///
    /// # Examples
    ///
    /// ```
    /// use codesize_diff::diff::Percentage;
    ///
    /// assert_eq!(Percentage::of(200, 1000), Percentage::Defined(20.0));
    /// assert_eq!(Percentage::of(-50, 0), Percentage::Undefined);
    /// ```
    pub fn of(diff: i64, dec_before: u64) -> Self {
        if dec_before == 0 {
            Self::Undefined
        } else {
            Self::Defined(diff as f64 * 100.0 / dec_before as f64)
        }
    }

    /// The value if defined
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Defined(p) => Some(p),
            Self::Undefined => None,
        }
    }
}

/// Direction of a single file's size change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// File shrank
    Improved,
    /// File grew
    Regressed,
    /// Same size in both builds
    Unchanged,
}

/// One file present in both builds
#[derive(Debug, Clone, PartialEq)]
pub struct DiffRecord {
    /// Build-relative filename shared by both builds
    pub filename: String,
    /// `dec` in the first build
    pub dec_before: u64,
    /// `dec` in the second build
    pub dec_after: u64,
    /// `dec_before - dec_after`; positive means the file shrank
    pub diff: i64,
    /// Relative change, see [`Percentage`]
    pub percentage: Percentage,
}

/// `before - after` in bytes, saturating at the bounds of `i64`
///
/// # Examples
///
/// ```
/// use codesize_diff::diff::signed_delta;
///
/// assert_eq!(signed_delta(1000, 800), 200);
/// assert_eq!(signed_delta(0, u64::MAX), i64::MIN);
/// ```
pub fn signed_delta(before: u64, after: u64) -> i64 {
    let delta = i128::from(before) - i128::from(after);
    i64::try_from(delta).unwrap_or(if delta < 0 { i64::MIN } else { i64::MAX })
}

impl DiffRecord {
    /// Build a record from the two `dec` values
    pub fn new(filename: impl Into<String>, dec_before: u64, dec_after: u64) -> Self {
        let diff = signed_delta(dec_before, dec_after);
        Self {
            filename: filename.into(),
            dec_before,
            dec_after,
            diff,
            percentage: Percentage::of(diff, dec_before),
        }
    }

    /// Whether the file shrank, grew or stayed the same
    pub fn change(&self) -> Change {
        match self.diff {
            d if d > 0 => Change::Improved,
            d if d < 0 => Change::Regressed,
            _ => Change::Unchanged,
        }
    }
}

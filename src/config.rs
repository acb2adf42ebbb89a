//! Comparison settings and `.codesize-diff.toml` loading
//!
//! Settings come from built-in defaults, then an optional config file, then
//! command-line flags (applied by the caller).

use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::error::CodeSizeError;
use crate::infra::{FileSystem, RealFileSystem};
use crate::report::{DEFAULT_CHART_WIDTH, DEFAULT_TOP_N};
use crate::size::DEFAULT_CLASSIFIER;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".codesize-diff.toml";

/// Narrowest chart that still leaves room for bars
pub const MIN_CHART_WIDTH: usize = 10;

/// Settings for one comparison run
///
/// # Examples
///
/// ```
/// use codesize_diff::config::CompareConfig;
///
/// let config: CompareConfig = toml_edit::de::from_str("top-n = 5\nskip-extensions = [\"a\"]\n")?;
/// assert_eq!(config.top_n, 5);
/// assert_eq!(config.classifier, "file");
/// assert!(config.validate().is_ok());
/// # Ok::<(), toml_edit::de::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct CompareConfig {
    /// Files shown per chart
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Classifier binary
    #[serde(default = "default_classifier")]
    pub classifier: String,

    /// Bar width in columns
    #[serde(default = "default_chart_width")]
    pub chart_width: usize,

    /// Extensions skipped in addition to `.o`
    #[serde(default)]
    pub skip_extensions: Vec<String>,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_classifier() -> String {
    DEFAULT_CLASSIFIER.to_string()
}

fn default_chart_width() -> usize {
    DEFAULT_CHART_WIDTH
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            classifier: default_classifier(),
            chart_width: default_chart_width(),
            skip_extensions: Vec::new(),
        }
    }
}

impl CompareConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), String> {
        if self.top_n == 0 {
            return Err("top-n must be at least 1".to_string());
        }
        if self.chart_width < MIN_CHART_WIDTH {
            return Err(format!(
                "chart-width must be at least {} columns",
                MIN_CHART_WIDTH
            ));
        }
        if self.classifier.trim().is_empty() {
            return Err("classifier must not be empty".to_string());
        }
        Ok(())
    }
}

/// Loads [`CompareConfig`] from disk
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load `.codesize-diff.toml` from `dir`, or defaults if it is absent
    pub fn load(dir: &Path) -> Result<CompareConfig, CodeSizeError> {
        Self::load_with_fs(dir, &RealFileSystem)
    }

    /// Load from `dir` with a custom filesystem implementation
    pub fn load_with_fs<FS: FileSystem>(dir: &Path, fs: &FS) -> Result<CompareConfig, CodeSizeError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !fs.exists(&path) {
            debug!("no {} in {}, using defaults", CONFIG_FILE_NAME, dir.display());
            return Ok(CompareConfig::default());
        }
        Self::load_file_with_fs(&path, fs)
    }

    /// Load an explicit config file, which must exist
    pub fn load_file(path: &Path) -> Result<CompareConfig, CodeSizeError> {
        Self::load_file_with_fs(path, &RealFileSystem)
    }

    /// Load an explicit config file with a custom filesystem implementation
    pub fn load_file_with_fs<FS: FileSystem>(
        path: &Path,
        fs: &FS,
    ) -> Result<CompareConfig, CodeSizeError> {
        let contents = fs.read_to_string(path).map_err(|source| CodeSizeError::Io {
            context: format!("reading {}", path.display()),
            source,
        })?;

        let config: CompareConfig =
            toml_edit::de::from_str(&contents).map_err(|e| CodeSizeError::InvalidConfig {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        config
            .validate()
            .map_err(|reason| CodeSizeError::InvalidConfig {
                path: path.to_path_buf(),
                reason,
            })?;

        debug!("loaded {}: {:?}", path.display(), config);
        Ok(config)
    }
}

//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for patchstat.
///
/// This struct represents the contents of `.patchstat.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format for reports.
    #[serde(default)]
    pub format: OutputFormat,

    /// Glob patterns; matching files are left out of statistics.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,

    /// Whether `stats` lists each file in addition to the totals.
    #[serde(default)]
    pub per_file: bool,

    /// Number of lines per hunk printed by `show`.
    #[serde(default = "default_sample_lines")]
    pub sample_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            exclude: Vec::new(),
            per_file: false,
            sample_lines: default_sample_lines(),
        }
    }
}

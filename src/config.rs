use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

pub const DEFAULT_INTERVAL_SECS: f64 = 0.5;
pub const DEFAULT_THRESHOLD: f64 = 300.0;
pub const DEFAULT_MAX_NAME_LEN: usize = 200;
pub const DEFAULT_EXT: &str = ".png";

/// Everything a run needs. Built from defaults, then an optional JSON file,
/// then command-line overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub csv_path: Option<PathBuf>,
    pub video_path: Option<PathBuf>,
    pub out_dir: PathBuf,
    pub ext: String,
    pub interval_secs: f64,
    pub threshold: f64,
    pub max_name_len: usize,
    /// 1-based CSV data row -> folder label
    pub mapping: BTreeMap<usize, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csv_path: None,
            video_path: None,
            out_dir: PathBuf::from("."),
            ext: DEFAULT_EXT.to_string(),
            interval_secs: DEFAULT_INTERVAL_SECS,
            threshold: DEFAULT_THRESHOLD,
            max_name_len: DEFAULT_MAX_NAME_LEN,
            mapping: default_mapping(),
        }
    }
}

pub fn default_mapping() -> BTreeMap<usize, String> {
    [(1, "x"), (2, "y"), (3, "z"), (5, "w_quat"), (6, "z_quat")]
        .into_iter()
        .map(|(row, label)| (row, label.to_string()))
        .collect()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Deserializes only; call `validate` once all overrides are applied.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.interval_secs > 0.0) {
            return Err(AppError::config(format!(
                "interval must be positive, got {}",
                self.interval_secs
            )));
        }
        if self.max_name_len == 0 {
            return Err(AppError::config("max_name_len must be at least 1"));
        }
        if self.mapping.contains_key(&0) {
            return Err(AppError::config("mapping rows are 1-based, found row 0"));
        }
        Ok(())
    }

    /// Extension with a leading dot, whether configured as `png` or `.png`.
    pub fn normalized_ext(&self) -> String {
        let trimmed = self.ext.trim().trim_start_matches('.');
        format!(".{}", trimmed)
    }

    pub fn require_csv(&self) -> Result<&Path> {
        self.csv_path
            .as_deref()
            .ok_or_else(|| AppError::config("no CSV path given (use --csv or the config file)"))
    }

    pub fn require_video(&self) -> Result<&Path> {
        self.video_path
            .as_deref()
            .ok_or_else(|| AppError::config("no video path given (use --video or the config file)"))
    }
}

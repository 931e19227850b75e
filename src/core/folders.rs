use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use super::formatter::format_value;
use super::sanitizer::sanitize_folder_name;
use super::table::CsvTable;
use crate::config::Config;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub enum FolderOutcome {
    Created {
        row: usize,
        path: PathBuf,
        /// Value sub-folders, only filled when value folders are enabled.
        values: Vec<PathBuf>,
    },
    Skipped {
        row: usize,
        label: String,
    },
}

#[derive(Debug, Default)]
pub struct FolderReport {
    pub outcomes: Vec<FolderOutcome>,
}

impl FolderReport {
    pub fn created(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FolderOutcome::Created { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.created()
    }
}

/// Creates one folder per mapped row that exists in `table`. With
/// `value_folders`, each cell of that row passing the threshold also gets a
/// sub-folder named after its formatted value.
pub fn create_folders(config: &Config, table: &CsvTable, value_folders: bool) -> Result<FolderReport> {
    fs::create_dir_all(&config.out_dir)?;

    let mut report = FolderReport::default();
    for (&row, label) in &config.mapping {
        let cells = match table.row_one_based(row) {
            Some(cells) => cells,
            None => {
                warn!("Row {} is not in the CSV ({} rows), skipped", row, table.row_count());
                report.outcomes.push(FolderOutcome::Skipped {
                    row,
                    label: label.clone(),
                });
                continue;
            }
        };

        let path = config.out_dir.join(sanitize_folder_name(label, config.max_name_len));
        fs::create_dir_all(&path)?;
        info!("Created {}", path.display());

        let mut values = Vec::new();
        if value_folders {
            for cell in cells {
                if let Some(name) = format_value(Some(cell.as_str()), config.threshold, config.max_name_len) {
                    let value_path = path.join(name);
                    fs::create_dir_all(&value_path)?;
                    info!("Created {}", value_path.display());
                    if !values.contains(&value_path) {
                        values.push(value_path);
                    }
                }
            }
            if values.is_empty() {
                info!("Row {} has no values >= {}", row, config.threshold);
            }
        }

        report.outcomes.push(FolderOutcome::Created { row, path, values });
    }

    Ok(report)
}

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::category::DATASET_SUFFIX;
use crate::error::DatasetError;
use crate::sink::{self, Table};

pub const AUTHOR_COLUMN: &str = "Author";
pub const COUNTRY_COLUMN: &str = "Country";
pub const ID_COLUMN: &str = "author_id";

/// Identifiers for (author, country) pairs, handed out in first-seen order.
/// One instance per dataset; nothing carries over between files.
#[derive(Debug, Default)]
pub struct PseudonymTable {
    ids: HashMap<(String, String), usize>,
}

impl PseudonymTable {
    pub fn id_for(&mut self, author: &str, country: &str) -> usize {
        let next = self.ids.len();
        *self
            .ids
            .entry((author.to_string(), country.to_string()))
            .or_insert(next)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Replace the Author column with an `author_id` column.
///
/// Returns the number of distinct authors. The table is left untouched when
/// either the Author or the Country column is missing.
pub fn pseudonymize_table(table: &mut Table, path: &Path) -> Result<usize, DatasetError> {
    let missing = |column: &'static str| DatasetError::MissingColumn {
        path: path.to_path_buf(),
        column,
    };
    let author = table.column(AUTHOR_COLUMN).ok_or_else(|| missing(AUTHOR_COLUMN))?;
    let country = table.column(COUNTRY_COLUMN).ok_or_else(|| missing(COUNTRY_COLUMN))?;

    let mut pseudonyms = PseudonymTable::default();
    for row in &mut table.rows {
        let id = pseudonyms.id_for(&row[author], &row[country]);
        row.remove(author);
        row.push(id.to_string());
    }
    table.headers.remove(author);
    table.headers.push(ID_COLUMN.to_string());

    Ok(pseudonyms.len())
}

/// Pseudonymize one dataset file in place.
pub fn process_dataset(path: &Path) -> Result<usize, DatasetError> {
    let mut table = sink::read_table(path)?;
    let authors = pseudonymize_table(&mut table, path)?;
    sink::write_table(path, &table)?;
    Ok(authors)
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct PseudonymizeSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl PseudonymizeSummary {
    pub fn print(&self) {
        println!(
            "Pseudonymized {} datasets ({} skipped, {} failed).",
            self.processed, self.skipped, self.failed
        );
    }
}

/// Every `*_reviews.csv` file in `dir`, sorted by name.
pub fn dataset_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("Failed to list {:?}", dir))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| {
            p.is_file()
                && p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with(DATASET_SUFFIX))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Pseudonymize every dataset in `dir`. Failures are logged per file and
/// never stop the remaining files.
pub fn process_directory(dir: &Path) -> Result<PseudonymizeSummary> {
    let mut summary = PseudonymizeSummary::default();

    for path in dataset_files(dir)? {
        match process_dataset(&path) {
            Ok(authors) => {
                info!(path = %path.display(), authors, "Pseudonymization complete");
                summary.processed += 1;
            }
            Err(e @ DatasetError::MissingColumn { .. }) => {
                warn!("Skipping {}", e);
                summary.skipped += 1;
            }
            Err(e) => {
                error!(path = %path.display(), "Error processing dataset: {}", e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

//! The cached data provider.
//!
//! The source table is read once per provider and shared as
//! `Arc<LoadedTable>` afterwards. Content is assumed static for the lifetime
//! of the process, so there is no invalidation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use nutri_model::FoodTable;
use thiserror::Error;
use tracing::info;

use crate::csv_table::read_csv_bytes;
use crate::error::{IngestError, Result};
use crate::hash::sha256_hex;
use crate::sanitize::{IngestOptions, SanitizeStats, build_table};

/// The nutrient source could not be loaded. Nothing can be compared without it.
#[derive(Debug, Error)]
#[error("nutrient data unavailable from {path}: {source}")]
pub struct DataUnavailable {
    pub path: PathBuf,
    #[source]
    pub source: IngestError,
}

/// A sanitized table together with where it came from.
#[derive(Debug)]
pub struct LoadedTable {
    pub table: FoodTable,
    pub source: PathBuf,
    /// SHA-256 of the source bytes.
    pub fingerprint: String,
    pub stats: SanitizeStats,
}

/// Parses and sanitizes CSV bytes. `source` is recorded but not read.
pub fn parse_table(bytes: &[u8], source: &Path, options: &IngestOptions) -> Result<LoadedTable> {
    let csv = read_csv_bytes(bytes, source)?;
    let (table, stats) = build_table(&csv, options, source)?;
    Ok(LoadedTable {
        table,
        source: source.to_path_buf(),
        fingerprint: sha256_hex(bytes),
        stats,
    })
}

/// Reads and sanitizes the table at `path` without caching.
pub fn load_table(path: &Path, options: &IngestOptions) -> Result<LoadedTable> {
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    parse_table(&bytes, path, options)
}

/// Loads the nutrient table on first use and hands out the cached copy after.
#[derive(Debug)]
pub struct DataProvider {
    path: PathBuf,
    options: IngestOptions,
    cache: OnceLock<Arc<LoadedTable>>,
}

impl DataProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            options: IngestOptions::default(),
            cache: OnceLock::new(),
        }
    }

    /// Sets the column options used by the first load.
    #[must_use]
    pub fn with_options(mut self, options: IngestOptions) -> Self {
        self.options = options;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Returns the cached table, reading the source on the first call.
    ///
    /// A failed load is not cached; the next call reads the source again.
    pub fn load(&self) -> std::result::Result<Arc<LoadedTable>, DataUnavailable> {
        if let Some(loaded) = self.cache.get() {
            return Ok(Arc::clone(loaded));
        }
        let start = Instant::now();
        let loaded = load_table(&self.path, &self.options).map_err(|source| DataUnavailable {
            path: self.path.clone(),
            source,
        })?;
        info!(
            path = %self.path.display(),
            foods = loaded.table.len(),
            groups = loaded.table.groups().len(),
            dropped = loaded.stats.dropped_rows,
            duration_ms = start.elapsed().as_millis(),
            "nutrient table loaded"
        );
        // A concurrent first load may have won the race; keep whichever landed.
        let cached = self.cache.get_or_init(|| Arc::new(loaded));
        Ok(Arc::clone(cached))
    }
}

//! Persisting the prepared catalog as JSON.

use crate::error::CatalogError;
use crate::prepare::GameRecord;
use std::path::Path;

/// Write the prepared catalog, creating parent directories as needed.
pub fn save_prepared(path: &Path, records: &[GameRecord]) -> Result<(), CatalogError> {
    let io_err = |source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(records).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(io_err)?;

    tracing::debug!(
        target: "gamefuzz::catalog",
        path = %path.display(),
        records = records.len(),
        "Saved prepared catalog"
    );
    Ok(())
}

/// Read a prepared catalog. Records with non-finite scores are dropped and
/// the rest are ordered by release year (stable).
pub fn load_prepared(path: &Path) -> Result<Vec<GameRecord>, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut records: Vec<GameRecord> =
        serde_json::from_str(&content).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let before = records.len();
    records.retain(GameRecord::has_finite_scores);
    if records.len() < before {
        tracing::warn!(
            target: "gamefuzz::catalog",
            dropped = before - records.len(),
            "Dropped records with unusable scores"
        );
    }
    records.sort_by_key(|r| r.release_year);
    Ok(records)
}

//! JSON Lines readers and writers for the review and summary tables.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use milletrec_core::ReviewRecord;
use milletrec_engine::EntitySummary;

use crate::StoreError;

/// Load the review dataset: one JSON object per line, blank lines skipped.
///
/// Every row is validated on load; the whole load fails on the first
/// malformed or invalid row rather than silently dropping data.
///
/// # Errors
///
/// Returns `StoreError` if the file cannot be read, a line is not valid
/// JSON, or a record fails validation (missing entity id, rating outside
/// 1-5, sentiment score outside [0, 1]).
pub fn load_reviews(path: &Path) -> Result<Vec<ReviewRecord>, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let reader = BufReader::new(file);

    let mut reviews = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let record: ReviewRecord =
            serde_json::from_str(&line).map_err(|e| StoreError::MalformedRow {
                path: path.display().to_string(),
                line: idx + 1,
                source: e,
            })?;

        record.validate().map_err(|e| StoreError::InvalidRow {
            path: path.display().to_string(),
            line: idx + 1,
            source: e,
        })?;

        reviews.push(record);
    }

    tracing::info!(path = %path.display(), rows = reviews.len(), "loaded review dataset");
    Ok(reviews)
}

/// Load a precomputed per-entity summary table, one JSON object per line.
///
/// # Errors
///
/// Returns `StoreError` if the file cannot be read or a line is not a
/// valid summary row.
pub fn load_summaries(path: &Path) -> Result<Vec<EntitySummary>, StoreError> {
    let file = File::open(path).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let reader = BufReader::new(file);

    let mut summaries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let summary: EntitySummary =
            serde_json::from_str(&line).map_err(|e| StoreError::MalformedRow {
                path: path.display().to_string(),
                line: idx + 1,
                source: e,
            })?;
        summaries.push(summary);
    }

    tracing::info!(path = %path.display(), rows = summaries.len(), "loaded summary table");
    Ok(summaries)
}

/// Write a summary table as JSON Lines, overwriting any existing file.
///
/// # Errors
///
/// Returns `StoreError` on I/O or serialization failure.
pub fn write_summaries(path: &Path, summaries: &[EntitySummary]) -> Result<(), StoreError> {
    let file = File::create(path).map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);

    for summary in summaries {
        let line = serde_json::to_string(summary)?;
        writeln!(writer, "{line}").map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
    }

    writer.flush().map_err(|e| StoreError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    tracing::info!(path = %path.display(), rows = summaries.len(), "wrote summary table");
    Ok(())
}

use crate::error::AppResult;
use crate::io;
use crate::logging::{log, LogLevel};
use crate::model::{ArtworkRecord, MetadataExport};
use crate::utils;
use std::path::{Path, PathBuf};

/// Reads the export CSV into a title-keyed map. Later rows win on title clashes.
pub fn read_export(csv_path: &Path) -> AppResult<MetadataExport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(csv_path)?;

    let mut export = MetadataExport::default();
    let mut rows = 0usize;
    for record in reader.deserialize::<ArtworkRecord>() {
        export.insert(&record?)?;
        rows += 1;
    }

    if rows > export.len() {
        log(
            LogLevel::Warning,
            &format!(
                "{} row(s) share a title with a later row and were overwritten in the JSON export",
                rows - export.len()
            ),
        );
    }
    Ok(export)
}

/// Converts the CSV at `csv_path` into the indented JSON object at `json_path`.
pub async fn create_json(csv_path: &Path, json_path: &Path) -> AppResult<usize> {
    let csv_owned: PathBuf = csv_path.to_path_buf();
    let export = utils::run_blocking(move || read_export(&csv_owned)).await?;
    let entries = export.len();
    if export.is_empty() {
        log(
            LogLevel::Warning,
            &format!(
                "{} has no data rows; writing an empty metadata export",
                csv_path.display()
            ),
        );
    }

    io::save_json(json_path.to_path_buf(), export.into_value(), "Metadata Export").await?;
    log(
        LogLevel::Success,
        &format!(
            "Wrote {} metadata entries to {}",
            entries,
            json_path.display()
        ),
    );
    Ok(entries)
}

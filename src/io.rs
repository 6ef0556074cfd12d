use crate::config;
use crate::error::{AppError, AppResult};
use crate::logging::{log, LogLevel};
use crate::utils;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// Object key for an artwork image: the title as scraped.
pub fn image_object_name(title: &str) -> String {
    format!("{}.{}", title, config::IMAGE_EXTENSION)
}

/// Local file name for an artwork image, safe to join onto the data dir.
pub fn image_file_name(title: &str) -> String {
    let cleaned = config::FORBIDDEN_CHARS_RE.replace_all(title.trim(), "_");
    let cleaned = cleaned.trim_matches(|c: char| c == '.' || c.is_whitespace());
    let stem = if cleaned.is_empty() {
        "invalid_or_empty_name"
    } else {
        cleaned
    };
    format!("{}.{}", stem, config::IMAGE_EXTENSION)
}

pub async fn ensure_data_dir(base_dir: &Path) -> AppResult<()> {
    log(
        LogLevel::Info,
        &format!("Ensuring data directory exists: {}", base_dir.display()),
    );
    fs::create_dir_all(base_dir)
        .await
        .map_err(|e| map_io_error(e, base_dir))
}

pub(crate) fn map_io_error(error: std::io::Error, path: &Path) -> AppError {
    AppError::Io(format!("I/O error at path '{}': {}", path.display(), error))
}

pub async fn write_file_async(fpath: &Path, data: &[u8]) -> AppResult<()> {
    let mut file = File::create(fpath)
        .await
        .map_err(|e| map_io_error(e, fpath))?;
    file.write_all(data)
        .await
        .map_err(|e| map_io_error(e, fpath))?;
    file.flush().await.map_err(|e| map_io_error(e, fpath))?;

    Ok(())
}

/// Pretty-prints `data` with four-space indentation.
pub fn to_json_bytes<T: Serialize + ?Sized>(data: &T) -> AppResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(config::JSON_INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)?;
    Ok(buf)
}

pub async fn save_json<T>(fpath: PathBuf, data: T, log_ctx: &str) -> AppResult<()>
where
    T: Serialize + Send + Sync + 'static,
{
    let json_bytes = match utils::run_blocking(move || to_json_bytes(&data)).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log(
                LogLevel::Error,
                &format!(
                    "Save JSON ({}) FAIL - Serialize/Task Error: {}. File: '{}'",
                    log_ctx,
                    e,
                    fpath.display()
                ),
            );
            return Err(e);
        }
    };

    if let Err(e) = write_file_async(&fpath, &json_bytes).await {
        log(
            LogLevel::Error,
            &format!(
                "Save JSON ({}) FAIL - Write Error: {}. File: '{}'",
                log_ctx,
                e,
                fpath.display()
            ),
        );
        if fs::try_exists(&fpath).await.unwrap_or(false) {
            let _ = fs::remove_file(&fpath).await;
        }
        return Err(e);
    }
    Ok(())
}

/// A file that lives only as long as this guard; dropped means deleted.
#[derive(Debug)]
pub struct TransientFile {
    path: PathBuf,
}

impl TransientFile {
    pub async fn create(path: PathBuf, data: &[u8]) -> AppResult<Self> {
        let guard = TransientFile { path };
        write_file_async(&guard.path, data).await?;
        Ok(guard)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => log(
                LogLevel::Warning,
                &format!(
                    "Could not remove temporary file '{}': {}",
                    self.path.display(),
                    e
                ),
            ),
        }
    }
}

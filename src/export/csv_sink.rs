use crate::config;
use crate::error::AppResult;
use crate::io::map_io_error;
use crate::model::ArtworkRecord;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Append-only CSV of scraped records, one row per card in traversal order.
///
/// Every row is flushed as soon as it is written so an interrupted run
/// leaves a readable file behind.
pub struct CsvSink {
    path: PathBuf,
    writer: csv::Writer<File>,
    rows: usize,
}

impl CsvSink {
    pub fn create(path: &Path) -> AppResult<Self> {
        let file = File::create(path).map_err(|e| map_io_error(e, path))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);
        writer.write_record(config::CSV_HEADERS)?;
        writer.flush().map_err(|e| map_io_error(e, path))?;

        Ok(Self {
            path: path.to_path_buf(),
            writer,
            rows: 0,
        })
    }

    pub fn append(&mut self, record: &ArtworkRecord) -> AppResult<()> {
        self.writer.serialize(record)?;
        self.writer
            .flush()
            .map_err(|e| map_io_error(e, &self.path))?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn flush(&mut self) -> AppResult<()> {
        self.writer
            .flush()
            .map_err(|e| map_io_error(e, &self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_header_even_without_rows() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("artvee.csv");
        let mut sink = CsvSink::create(&path).unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.rows(), 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "Title,Artist,Category\r\n");
    }

    #[test]
    fn rows_are_visible_before_flush() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("artvee.csv");
        let mut sink = CsvSink::create(&path).unwrap();
        sink.append(&ArtworkRecord::new("Nocturne, Blue", "J. Whistler", "landscape"))
            .unwrap();
        sink.append(&ArtworkRecord::new("Untitled", "Unknown", "landscape"))
            .unwrap();
        assert_eq!(sink.rows(), 2);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Title,Artist,Category",
                "\"Nocturne, Blue\",J. Whistler,landscape",
                "Untitled,Unknown,landscape",
            ]
        );
    }
}

use super::stats::{self, RunStats};
use crate::config;
use crate::error::AppResult;
use crate::export::CsvSink;
use crate::net::PageFetcher;
use crate::storage::ObjectStore;
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a run needs to know up front.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub base_url: String,
    pub data_dir: PathBuf,
    pub categories: Vec<String>,
    pub bucket: String,
    pub region: Option<String>,
}

impl RunSettings {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            base_url: config::DEFAULT_BASE_URL.to_string(),
            data_dir,
            categories: config::CATEGORIES.iter().map(|c| c.to_string()).collect(),
            bucket: config::DEFAULT_BUCKET.to_string(),
            region: Some(config::DEFAULT_REGION.to_string()),
        }
    }

    pub fn csv_path(&self) -> PathBuf {
        self.data_dir.join(config::CSV_FILE_NAME)
    }

    pub fn json_path(&self) -> PathBuf {
        self.data_dir.join(config::JSON_FILE_NAME)
    }
}

/// Handles shared by every stage of one run: the site client, the store,
/// the open CSV sink and the counters.
pub struct RunContext {
    pub settings: RunSettings,
    pub fetcher: Arc<dyn PageFetcher>,
    pub store: Arc<dyn ObjectStore>,
    pub sink: CsvSink,
    pub stats: RunStats,
}

impl RunContext {
    /// Opens the CSV sink. The data directory must already exist.
    pub fn open(
        settings: RunSettings,
        fetcher: Arc<dyn PageFetcher>,
        store: Arc<dyn ObjectStore>,
    ) -> AppResult<Self> {
        let sink = CsvSink::create(&settings.csv_path())?;
        Ok(Self {
            settings,
            fetcher,
            store,
            sink,
            stats: stats::initialize_stats(),
        })
    }
}

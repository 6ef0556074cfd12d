use crate::config;
use crate::core::RunSettings;
use crate::error::{AppError, AppResult};
use crate::logging::{log, LogLevel};
use crate::storage::StoreTarget;
use clap::{Parser, ValueEnum};
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// Amazon S3 or an S3-compatible service
    S3,
    /// Directories on the local filesystem
    Local,
}

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Scrapes the Artvee catalog: metadata to CSV/JSON, images to object storage.",
    long_about = None,
    after_help = format!("Supported categories:\n    all, {}", config::CATEGORIES.join(", ")),
    arg_required_else_help = true
)]
pub struct CliArgs {
    #[arg(
        long,
        value_name = "DIR_PATH",
        required_unless_present = "test_listing_file",
        help = "Directory for the CSV, the JSON export and temporary images"
    )]
    data_dir: Option<String>,

    #[arg(
        short, long,
        num_args = 1..,
        value_delimiter = ' ',
        default_value = "all",
        help = "Categories to scrape (e.g., abstract posters) or 'all'"
    )]
    categories: Vec<String>,

    #[arg(long, default_value = config::DEFAULT_BUCKET, value_name = "NAME", help = "Destination bucket")]
    bucket: String,

    #[arg(
        long,
        default_value = config::DEFAULT_REGION,
        value_name = "REGION",
        help = "Bucket region (empty for the provider default)"
    )]
    region: String,

    #[arg(long, value_enum, default_value = "s3", help = "Object store backend")]
    store: StoreKind,

    #[arg(
        long,
        value_name = "DIR_PATH",
        required_if_eq("store", "local"),
        help = "Root directory for --store local"
    )]
    store_dir: Option<String>,

    #[arg(long, value_name = "URL", help = "Custom S3-compatible endpoint (path-style)")]
    s3_endpoint: Option<String>,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Per-request HTTP timeout; requests wait indefinitely when unset"
    )]
    timeout: Option<u64>,

    #[arg(long, default_value = config::DEFAULT_BASE_URL, value_name = "URL", help = "Catalog site base URL")]
    base_url: String,

    #[arg(
        long,
        value_name = "FILE_PATH",
        help = "Extract cards from a saved listing page and exit (no network, no upload)",
        conflicts_with = "data_dir"
    )]
    test_listing_file: Option<String>,

    #[arg(
        long,
        default_value = "test_cards.json",
        value_name = "OUTPUT_FILE",
        help = "Output file name for test mode",
        requires = "test_listing_file"
    )]
    test_output_file: String,
}

impl CliArgs {
    pub fn get_test_listing_file(&self) -> Option<PathBuf> {
        self.test_listing_file.as_deref().map(PathBuf::from)
    }

    pub fn get_test_output_file(&self) -> PathBuf {
        PathBuf::from(&self.test_output_file)
    }

    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }

    pub fn get_data_dir(&self) -> AppResult<PathBuf> {
        match self.data_dir.as_deref().map(str::trim) {
            Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
            _ => {
                log(
                    LogLevel::Warning,
                    "No data directory set. Pass --data-dir <DIR_PATH> for the CSV, JSON and temporary images.",
                );
                Err(AppError::Argument("Data directory is empty.".into()))
            }
        }
    }

    /// Selected categories, always in catalog order.
    pub fn get_categories(&self) -> AppResult<Vec<String>> {
        let inputs: HashSet<String> = self
            .categories
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        if inputs.contains("all") {
            log(LogLevel::Info, "Processing all catalog categories.");
            return Ok(config::CATEGORIES.iter().map(|c| c.to_string()).collect());
        }

        let supported: HashSet<&str> = config::CATEGORIES.iter().copied().collect();
        let mut invalid: Vec<&str> = inputs
            .iter()
            .map(String::as_str)
            .filter(|c| !supported.contains(c))
            .collect();
        if !invalid.is_empty() {
            invalid.sort_unstable();
            log(
                LogLevel::Warning,
                &format!("Ignoring unknown categories: {}", invalid.join(", ")),
            );
        }

        let selected: Vec<String> = config::CATEGORIES
            .iter()
            .filter(|c| inputs.contains(**c))
            .map(|c| c.to_string())
            .collect();

        if selected.is_empty() {
            return Err(AppError::Argument(
                "No *valid* catalog categories specified.".into(),
            ));
        }
        log(
            LogLevel::Info,
            &format!("Processing specified categories: {}", selected.join(", ")),
        );
        Ok(selected)
    }

    pub fn get_timeout(&self) -> Option<Duration> {
        self.timeout.filter(|secs| *secs > 0).map(Duration::from_secs)
    }

    pub fn get_region(&self) -> Option<String> {
        Some(self.region.trim().to_string()).filter(|r| !r.is_empty())
    }

    pub fn run_settings(&self) -> AppResult<RunSettings> {
        let mut settings = RunSettings::new(self.get_data_dir()?);
        settings.categories = self.get_categories()?;
        settings.base_url = self.base_url.trim_end_matches('/').to_string();
        settings.bucket = self.bucket.clone();
        settings.region = self.get_region();
        Ok(settings)
    }

    pub fn store_target(&self) -> AppResult<StoreTarget> {
        match self.store {
            StoreKind::S3 => Ok(StoreTarget::S3 {
                region: self.get_region(),
                endpoint: self.s3_endpoint.clone(),
            }),
            StoreKind::Local => self
                .store_dir
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(|d| StoreTarget::Local(PathBuf::from(d)))
                .ok_or_else(|| {
                    AppError::Argument("--store local needs a non-empty --store-dir.".into())
                }),
        }
    }
}

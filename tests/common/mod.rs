#![allow(dead_code)]

use artvee_scrape::config;
use artvee_scrape::core::RunSettings;
use artvee_scrape::error::{AppError, AppResult};
use artvee_scrape::net::PageFetcher;
use artvee_scrape::storage::{BucketStatus, LocalStore, ObjectStore, StorageError};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

pub const BASE_URL: &str = "https://artvee.test";
pub const DOWNLOAD_CLASSES: &str = "prem-link gr btn btn-secondary dis snax-action snax-action-add-to-collection snax-action-add-to-collection-downloads";

#[derive(Debug, Clone)]
pub struct Artwork {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub slug: String,
    pub downloadable: bool,
}

impl Artwork {
    pub fn new(title: &str, artist: &str, slug: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            artist: Some(artist.to_string()),
            slug: slug.to_string(),
            downloadable: true,
        }
    }

    pub fn anonymous(slug: &str) -> Self {
        Self {
            title: None,
            artist: None,
            slug: slug.to_string(),
            downloadable: true,
        }
    }

    pub fn without_download(mut self) -> Self {
        self.downloadable = false;
        self
    }

    pub fn detail_url(&self) -> String {
        format!("{}/dl/{}/", BASE_URL, self.slug)
    }

    pub fn image_url(&self) -> String {
        format!("{}/img/{}.jpg", BASE_URL, self.slug)
    }

    pub fn image_bytes(&self) -> Vec<u8> {
        format!("JPEG:{}", self.slug).into_bytes()
    }

    fn card_html(&self) -> String {
        let title = self
            .title
            .as_ref()
            .map(|t| {
                format!(
                    r#"<h3 class="product-title"><a href="{}">{}</a></h3>"#,
                    self.detail_url(),
                    t
                )
            })
            .unwrap_or_default();
        let artist = self
            .artist
            .as_ref()
            .map(|a| format!(r#"<div class="woodmart-product-brands-links"><a href="/artist/">{}</a></div>"#, a))
            .unwrap_or_default();
        format!(
            r#"<div class="product-grid-item product woodmart-hover-tiled col-6 col-md-3">
                <div class="product-element-top">
                    <a class="product-image-link linko" href="/dl/{}/"><img src="/thumb.jpg"></a>
                </div>
                {}{}
            </div>"#,
            self.slug, title, artist
        )
    }

    fn detail_html(&self) -> String {
        let link = if self.downloadable {
            format!(
                r#"<a class="{}" href="{}">Download</a>"#,
                DOWNLOAD_CLASSES,
                self.image_url()
            )
        } else {
            r#"<a class="prem-link gr btn" href="/membership/">Members only</a>"#.to_string()
        };
        format!("<html><body><div class=\"summary\">{}</div></body></html>", link)
    }
}

pub fn listing_html(results: u64, artworks: &[Artwork]) -> String {
    let cards: String = artworks.iter().map(Artwork::card_html).collect();
    format!(
        r#"<html><body>
            <p class="woocommerce-result-count">{} results</p>
            <div class="products">{}</div>
        </body></html>"#,
        results, cards
    )
}

/// In-memory catalog site that records every URL requested.
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, String>,
    blobs: HashMap<String, Bytes>,
    requests: Mutex<Vec<String>>,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Serves `pages` as listing pages 1..=N of `category`, with detail pages
    /// and image blobs for every artwork.
    pub fn with_category(mut self, category: &str, results: u64, pages: Vec<Vec<Artwork>>) -> Self {
        for (i, artworks) in pages.iter().enumerate() {
            let url = config::listing_url(BASE_URL, category, i as u64 + 1);
            self.pages.insert(url, listing_html(results, artworks));
            for art in artworks {
                self.pages.insert(art.detail_url(), art.detail_html());
                self.blobs
                    .insert(art.image_url(), Bytes::from(art.image_bytes()));
            }
        }
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn listing_requests(&self) -> Vec<String> {
        self.requests()
            .into_iter()
            .filter(|u| u.contains("/c/"))
            .collect()
    }

    fn record(&self, url: &str) {
        self.requests.lock().unwrap().push(url.to_string());
    }
}

#[async_trait]
impl PageFetcher for FakeSite {
    async fn fetch_text(&self, url: &str) -> AppResult<String> {
        self.record(url);
        self.pages.get(url).cloned().ok_or(AppError::HttpStatus {
            status: 404,
            url: url.to_string(),
        })
    }

    async fn fetch_bytes(&self, url: &str) -> AppResult<Bytes> {
        self.record(url);
        self.blobs.get(url).cloned().ok_or(AppError::HttpStatus {
            status: 404,
            url: url.to_string(),
        })
    }
}

/// Local store with switchable failures.
pub struct FlakyStore {
    pub inner: LocalStore,
    pub fail_bucket: bool,
    pub fail_puts: bool,
}

#[async_trait]
impl ObjectStore for FlakyStore {
    async fn create_bucket(
        &self,
        bucket: &str,
        region: Option<&str>,
    ) -> Result<BucketStatus, StorageError> {
        if self.fail_bucket {
            return Err(StorageError::Backend("AccessDenied".into()));
        }
        self.inner.create_bucket(bucket, region).await
    }

    async fn put_file(&self, bucket: &str, key: &str, path: &Path) -> Result<(), StorageError> {
        if self.fail_puts {
            return Err(StorageError::Backend("SlowDown".into()));
        }
        self.inner.put_file(bucket, key, path).await
    }
}

pub struct Workspace {
    _tmp: TempDir,
    pub data_dir: PathBuf,
    pub store_dir: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let data_dir = tmp.path().join("data");
        let store_dir = tmp.path().join("store");
        Self {
            _tmp: tmp,
            data_dir,
            store_dir,
        }
    }

    pub fn settings(&self, categories: &[&str]) -> RunSettings {
        let mut settings = RunSettings::new(self.data_dir.clone());
        settings.base_url = BASE_URL.to_string();
        settings.categories = categories.iter().map(|c| c.to_string()).collect();
        settings
    }

    pub fn store(&self) -> LocalStore {
        LocalStore::new(&self.store_dir)
    }

    pub fn bucket_dir(&self) -> PathBuf {
        self.store_dir.join(config::DEFAULT_BUCKET)
    }

    pub fn csv_lines(&self) -> Vec<String> {
        let text = std::fs::read_to_string(self.data_dir.join(config::CSV_FILE_NAME))
            .expect("csv exists");
        text.lines().map(String::from).collect()
    }

    pub fn stored_objects(&self) -> Vec<String> {
        let mut names: Vec<String> = match std::fs::read_dir(self.bucket_dir()) {
            Ok(entries) => entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    pub fn leftover_images(&self) -> Vec<PathBuf> {
        std::fs::read_dir(&self.data_dir)
            .map(|entries| {
                entries
                    .map(|e| e.unwrap().path())
                    .filter(|p| p.extension().is_some_and(|ext| ext == "jpg"))
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub fn numbered(prefix: &str, range: std::ops::RangeInclusive<usize>) -> Vec<Artwork> {
    range
        .map(|i| {
            Artwork::new(
                &format!("{} {}", prefix, i),
                &format!("Painter {}", i),
                &format!("{}-{}", prefix.to_lowercase(), i),
            )
        })
        .collect()
}

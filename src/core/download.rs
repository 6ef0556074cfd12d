use crate::error::AppResult;
use crate::io::{self, TransientFile};
use crate::logging::{log, LogLevel};
use crate::net::PageFetcher;
use crate::scrape;
use crate::storage::ObjectStore;
use std::path::Path;

/// Follows a card's detail link to its image and stores it under `data_dir`.
pub async fn download_image(
    fetcher: &dyn PageFetcher,
    detail_url: &str,
    title: &str,
    data_dir: &Path,
) -> AppResult<TransientFile> {
    let detail_html = fetcher.fetch_text(detail_url).await?;
    let image_url = scrape::extract_download_url(&detail_html, detail_url)?;
    let bytes = fetcher.fetch_bytes(&image_url).await?;

    let path = data_dir.join(io::image_file_name(title));
    TransientFile::create(path, &bytes).await
}

/// Uploads the image as `<title>.jpg`. The local copy is removed whether or
/// not the upload succeeded.
pub async fn upload_image(
    store: &dyn ObjectStore,
    bucket: &str,
    title: &str,
    image: TransientFile,
) -> AppResult<()> {
    let key = io::image_object_name(title);
    let result = store.put_file(bucket, &key, image.path()).await;
    drop(image);

    result.map_err(|e| {
        log(
            LogLevel::Error,
            &format!("Upload of '{}' to bucket '{}' failed: {}", key, bucket, e),
        );
        e.into()
    })
}

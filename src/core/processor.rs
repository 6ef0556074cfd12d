use super::context::{RunContext, RunSettings};
use super::download;
use super::stats::{self, RunStats};
use crate::config;
use crate::error::AppResult;
use crate::export;
use crate::io;
use crate::logging::{log, LogLevel};
use crate::model::{ArtworkRecord, Card, ExtractedCard, LinkSource};
use crate::net::PageFetcher;
use crate::scrape;
use crate::storage::{self, ObjectStore};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Scrapes every selected category in order, then writes and uploads the
/// metadata export.
///
/// Any error other than a failed bucket setup ends the run; the CSV written
/// so far stays on disk.
pub async fn run(
    settings: RunSettings,
    fetcher: Arc<dyn PageFetcher>,
    store: Arc<dyn ObjectStore>,
) -> AppResult<RunStats> {
    let overall_start_time = Instant::now();
    let start_ts_str = Utc::now().format("%Y-%m-%d %H:%M:%S %Z").to_string();

    log(
        LogLevel::Step,
        &format!(
            "Starting Artvee scrape for {} categor{} at {}",
            settings.categories.len(),
            if settings.categories.len() == 1 { "y" } else { "ies" },
            start_ts_str
        ),
    );
    log(
        LogLevel::Info,
        &format!(
            "Data Directory: {} | Bucket: {}",
            settings.data_dir.display(),
            settings.bucket
        ),
    );

    io::ensure_data_dir(&settings.data_dir).await?;

    let bucket_ready =
        storage::ensure_bucket(store.as_ref(), &settings.bucket, settings.region.as_deref()).await;

    let mut ctx = RunContext::open(settings, fetcher, store)?;
    let bucket_stats = stats::phase(&mut ctx.stats, stats::BUCKET_SETUP);
    bucket_stats.set_total(1);
    if bucket_ready {
        bucket_stats.add_ok();
    } else {
        bucket_stats.add_fail();
    }

    let outcome = scrape_and_export(&mut ctx).await;

    stats::print_summary(
        &ctx.stats,
        &ctx.settings.categories,
        overall_start_time.elapsed(),
    );
    outcome.map(|_| ctx.stats)
}

async fn scrape_and_export(ctx: &mut RunContext) -> AppResult<()> {
    let categories = ctx.settings.categories.clone();
    stats::phase(&mut ctx.stats, stats::CATEGORIES).set_total(categories.len());

    log(LogLevel::Step, "--- Phase 1: Category Scrape ---");
    for category in &categories {
        let category_start = Instant::now();
        if let Err(e) = scrape_category(ctx, category).await {
            stats::phase(&mut ctx.stats, stats::CATEGORIES).add_fail();
            log(
                LogLevel::Error,
                &format!("Category '{}' aborted the run: {}", category, e),
            );
            return Err(e);
        }
        log_category_completion(category, ctx, category_start.elapsed());
    }
    ctx.sink.flush()?;

    log(LogLevel::Step, "--- Phase 2: Metadata Export ---");
    if let Err(e) = export_metadata(ctx).await {
        stats::phase(&mut ctx.stats, stats::METADATA_EXPORT).add_fail();
        return Err(e);
    }
    stats::phase(&mut ctx.stats, stats::METADATA_EXPORT).add_ok();
    Ok(())
}

/// Counts a category's pages from its first listing page, then scrapes
/// pages `1..=N`. The first page is fetched once and reused.
async fn scrape_category(ctx: &mut RunContext, category: &str) -> AppResult<()> {
    let base_url = ctx.settings.base_url.clone();
    let first_url = config::listing_url(&base_url, category, 1);
    let first_html = ctx.fetcher.fetch_text(&first_url).await?;

    let results = scrape::extract_result_count(&first_html, category, &first_url)?;
    let pages = scrape::page_count(results);
    log(
        LogLevel::Info,
        &format!(
            "Category '{}': {} result(s) across {} page(s)",
            category, results, pages
        ),
    );
    stats::phase(&mut ctx.stats, stats::LISTING_PAGES).add_total(pages as usize);

    if pages == 0 {
        stats::phase(&mut ctx.stats, stats::CATEGORIES).add_skip();
        return Ok(());
    }

    let mut cached_first_page = Some(first_html);
    for page in 1..=pages {
        log(
            LogLevel::Page,
            &format!("Currently looking at: {}, page {}", category, page),
        );
        let url = config::listing_url(&base_url, category, page);
        let html = match cached_first_page.take() {
            Some(html) => html,
            None => ctx.fetcher.fetch_text(&url).await?,
        };

        let scraped = scrape_listing_page(ctx, category, &html, &url).await?;
        let page_stats = stats::phase(&mut ctx.stats, stats::LISTING_PAGES);
        if scraped == 0 {
            page_stats.add_skip();
        } else {
            page_stats.add_ok();
        }
    }

    stats::phase(&mut ctx.stats, stats::CATEGORIES).add_ok();
    Ok(())
}

async fn scrape_listing_page(
    ctx: &mut RunContext,
    category: &str,
    html: &str,
    url: &str,
) -> AppResult<usize> {
    let cards = scrape::extract_cards(html, url)?;
    if cards.is_empty() {
        log(
            LogLevel::Warning,
            &format!("No artwork cards found on {}", url),
        );
        return Ok(0);
    }
    log_positional_pairing(&cards, url);

    stats::phase(&mut ctx.stats, stats::CARDS).add_total(cards.len());
    stats::phase(&mut ctx.stats, stats::IMAGE_UPLOADS).add_total(cards.len());

    for extracted in &cards {
        match process_card(ctx, category, &extracted.card).await {
            Ok(()) => stats::phase(&mut ctx.stats, stats::CARDS).add_ok(),
            Err(e) => {
                stats::phase(&mut ctx.stats, stats::CARDS).add_fail();
                return Err(e);
            }
        }
    }
    Ok(cards.len())
}

/// Download, upload, then record one card. The CSV row is only written
/// once the image step is done.
async fn process_card(ctx: &mut RunContext, category: &str, card: &Card) -> AppResult<()> {
    let image = download::download_image(
        ctx.fetcher.as_ref(),
        &card.detail_url,
        &card.title,
        &ctx.settings.data_dir,
    )
    .await?;

    let uploaded =
        download::upload_image(ctx.store.as_ref(), &ctx.settings.bucket, &card.title, image).await;
    let upload_stats = stats::phase(&mut ctx.stats, stats::IMAGE_UPLOADS);
    match uploaded {
        Ok(()) => upload_stats.add_ok(),
        Err(e) => {
            upload_stats.add_fail();
            return Err(e);
        }
    }

    ctx.sink
        .append(&ArtworkRecord::new(&card.title, &card.artist, category))
}

async fn export_metadata(ctx: &mut RunContext) -> AppResult<()> {
    stats::phase(&mut ctx.stats, stats::METADATA_EXPORT).set_total(1);
    let csv_path = ctx.settings.csv_path();
    let json_path = ctx.settings.json_path();

    export::create_json(&csv_path, &json_path).await?;

    ctx.store
        .put_file(
            &ctx.settings.bucket,
            config::METADATA_OBJECT_NAME,
            &json_path,
        )
        .await
        .map_err(|e| {
            log(
                LogLevel::Error,
                &format!(
                    "Upload of '{}' to bucket '{}' failed: {}",
                    config::METADATA_OBJECT_NAME,
                    ctx.settings.bucket,
                    e
                ),
            );
            e
        })?;
    log(
        LogLevel::Success,
        &format!(
            "Uploaded '{}' to bucket '{}'",
            config::METADATA_OBJECT_NAME,
            ctx.settings.bucket
        ),
    );
    Ok(())
}

fn log_positional_pairing(cards: &[ExtractedCard], url: &str) {
    let positional = cards
        .iter()
        .filter(|c| c.link_source == LinkSource::Position)
        .count();
    if positional > 0 {
        log(
            LogLevel::Warning,
            &format!(
                "{} of {} card(s) on {} paired with detail links by position",
                positional,
                cards.len(),
                url
            ),
        );
    }
}

fn log_category_completion(category: &str, ctx: &RunContext, elapsed: Duration) {
    log(
        LogLevel::Success,
        &format!(
            "--- Category '{}' complete ({} row(s) written so far) | Elapsed: {:?} ---",
            category,
            ctx.sink.rows(),
            elapsed
        ),
    );
}

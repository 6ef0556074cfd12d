use super::html::{has_exact_classes, non_empty_attr};
use crate::config;
use crate::error::{AppError, AppResult};
use crate::net;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static DOWNLOAD_LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(config::SEL_DOWNLOAD_LINK).expect("Invalid download link selector")
});

/// Finds the image download URL on an artwork's detail page.
///
/// Only an anchor carrying exactly the download class list counts; a missing
/// anchor or href is an error.
pub fn extract_download_url(html: &str, detail_url: &str) -> AppResult<String> {
    let document = Html::parse_document(html);
    let href = document
        .select(&DOWNLOAD_LINK_SELECTOR)
        .filter(|a| has_exact_classes(*a, config::DOWNLOAD_LINK_CLASSES))
        .find_map(|a| non_empty_attr(a, "href"))
        .ok_or_else(|| AppError::missing_element("download link", detail_url))?;
    net::resolve_href(detail_url, href)
}

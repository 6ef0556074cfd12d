use super::html::element_text;
use crate::config;
use crate::error::{AppError, AppResult};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

static RESULT_COUNT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(config::SEL_RESULT_COUNT).expect("Invalid result count selector")
});

/// Number of listing pages needed for `results` artworks.
pub fn page_count(results: u64) -> u64 {
    results / config::PAGE_SIZE + u64::from(results % config::PAGE_SIZE > 0)
}

/// Parses text such as `"1,234 results"` into `1234`.
pub fn parse_result_count(text: &str, category: &str) -> AppResult<u64> {
    let stripped = config::RESULT_COUNT_SUFFIX_RE.replace(text.trim(), "");
    let digits: String = stripped.trim().chars().filter(|c| *c != ',').collect();
    digits
        .parse::<u64>()
        .map_err(|_| AppError::result_count(text.trim(), category))
}

/// Reads the result count off the first listing page of a category.
pub fn extract_result_count(html: &str, category: &str, url: &str) -> AppResult<u64> {
    let document = Html::parse_document(html);
    let node = document
        .select(&RESULT_COUNT_SELECTOR)
        .next()
        .ok_or_else(|| AppError::missing_element(config::SEL_RESULT_COUNT, url))?;
    parse_result_count(&element_text(node), category)
}

use crate::error::{AppError, AppResult};
use crate::io;
use crate::logging::{log, LogLevel};
use crate::scrape;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Runs the card extractor over a saved listing page and writes the cards
/// as JSON. Relative links resolve against `page_url`.
pub async fn test_listing_extract(
    input_path: &Path,
    output_path: PathBuf,
    page_url: &str,
) -> AppResult<usize> {
    log(LogLevel::Info, "--- Running Listing Extract Test ---");
    log(
        LogLevel::Info,
        &format!("Input file: {}", input_path.display()),
    );
    log(
        LogLevel::Info,
        &format!("Output file: {}", output_path.display()),
    );

    let html = fs::read_to_string(input_path)
        .await
        .map_err(|e| io::map_io_error(e, input_path))?;

    let cards = match scrape::extract_cards(&html, page_url) {
        Ok(cards) => cards,
        Err(e) => {
            log(LogLevel::Error, &format!("Extraction failed: {}", e));
            return Err(e);
        }
    };

    if cards.is_empty() {
        log(
            LogLevel::Warning,
            "No cards found in the input file. No file generated.",
        );
        return Ok(0);
    }

    let count = cards.len();
    io::save_json(output_path.clone(), cards, "Listing Extract Test").await?;
    log(
        LogLevel::Success,
        &format!("Saved {} card(s) to {}", count, output_path.display()),
    );
    Ok(count)
}

/// Guards test mode against a page URL the extractor could not resolve against.
pub fn test_page_url(base_url: &str) -> AppResult<String> {
    let url = format!("{}/", base_url.trim_end_matches('/'));
    reqwest::Url::parse(&url)
        .map(String::from)
        .map_err(|e| AppError::Argument(format!("Invalid --base-url '{}': {}", base_url, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn writes_extracted_cards() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("listing.html");
        std::fs::write(
            &input,
            r#"<div class="product-grid-item product woodmart-hover-tiled">
                <a class="product-image-link linko" href="/dl/sunflowers/"></a>
                <h3 class="product-title"><a href="/dl/sunflowers/">Sunflowers</a></h3>
                <div class="woodmart-product-brands-links"><a>Vincent van Gogh</a></div>
            </div>"#,
        )
        .unwrap();
        let output = temp.path().join("cards.json");

        let count = test_listing_extract(&input, output.clone(), "https://artvee.com/")
            .await
            .unwrap();
        assert_eq!(count, 1);

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(parsed[0]["title"], "Sunflowers");
        assert_eq!(parsed[0]["artist"], "Vincent van Gogh");
        assert_eq!(parsed[0]["detailUrl"], "https://artvee.com/dl/sunflowers/");
        assert_eq!(parsed[0]["linkSource"], "card");
    }

    #[test]
    fn page_url_must_parse() {
        assert_eq!(test_page_url("https://artvee.com").unwrap(), "https://artvee.com/");
        assert!(test_page_url("artvee").is_err());
    }
}

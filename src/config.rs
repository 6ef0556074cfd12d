use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_BASE_URL: &str = "https://artvee.com";
pub const PAGE_SIZE: u64 = 48;

pub const DEFAULT_BUCKET: &str = "artvee";
pub const DEFAULT_REGION: &str = "us-west-1";
pub const METADATA_OBJECT_NAME: &str = "artveeMeta.json";

pub const CSV_FILE_NAME: &str = "artvee.csv";
pub const JSON_FILE_NAME: &str = "artvee.json";
pub const IMAGE_EXTENSION: &str = "jpg";

pub const CSV_HEADERS: [&str; 3] = ["Title", "Artist", "Category"];
pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_ARTIST: &str = "Unknown";
pub const JSON_INDENT: &[u8] = b"    ";

/// Catalog partitions, in traversal order.
pub const CATEGORIES: [&str; 14] = [
    "abstract",
    "figurative",
    "landscape",
    "religion",
    "mythology",
    "posters",
    "animals",
    "illustration",
    "fashion",
    "still-life",
    "historical",
    "botanical",
    "drawings",
    "japanese-art",
];

pub const SEL_RESULT_COUNT: &str = "p.woocommerce-result-count";
pub const SEL_CARD_TITLE: &str = "h3.product-title";
pub const SEL_CARD_ARTIST: &str = "div.woodmart-product-brands-links";
pub const SEL_DETAIL_LINK: &str = "a.product-image-link.linko";
pub const SEL_DOWNLOAD_LINK: &str = "a.snax-action-add-to-collection-downloads";

pub const DETAIL_LINK_CLASSES: &[&str] = &["product-image-link", "linko"];
pub const DOWNLOAD_LINK_CLASSES: &[&str] = &[
    "prem-link",
    "gr",
    "btn",
    "btn-secondary",
    "dis",
    "snax-action",
    "snax-action-add-to-collection",
    "snax-action-add-to-collection-downloads",
];

// Searched anywhere in the class attribute so variant class lists still match.
pub static CARD_CLASS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"product-grid-item product woodmart-hover-tiled*").expect("Invalid card class regex")
});

pub static RESULT_COUNT_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*results?\s*$").expect("Invalid result count regex"));

pub static FORBIDDEN_CHARS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[<>:"/\\|?*\x00-\x1f\x7f]"#).expect("Invalid forbidden chars regex")
});

pub const USER_AGENT_VAL: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub fn listing_url(base_url: &str, category: &str, page: u64) -> String {
    format!(
        "{}/c/{}/page/{}/?per_page={}",
        base_url.trim_end_matches('/'),
        category,
        page,
        PAGE_SIZE
    )
}

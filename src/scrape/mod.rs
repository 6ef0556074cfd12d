pub mod cards;
pub mod count;
pub mod detail;
pub(crate) mod html;

pub use cards::extract_cards;
pub use count::{extract_result_count, page_count, parse_result_count};
pub use detail::extract_download_url;

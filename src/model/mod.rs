pub mod common;
pub mod output;

pub use common::{Card, ExtractedCard, LinkSource};
pub use output::{ArtworkRecord, MetadataExport};

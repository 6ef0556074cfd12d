use serde::Serialize;

/// One artwork as it appears on a listing page.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub title: String,
    pub artist: String,
    pub detail_url: String,
}

/// Where a card's detail link came from.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum LinkSource {
    /// Anchor found inside the card element itself.
    Card,
    /// Nth detail anchor on the page, paired with the Nth card.
    Position,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedCard {
    #[serde(flatten)]
    pub card: Card,
    pub link_source: LinkSource,
}

use super::html::{element_text, has_exact_classes, non_empty_attr};
use crate::config;
use crate::error::{AppError, AppResult};
use crate::model::{Card, ExtractedCard, LinkSource};
use crate::net;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static CLASSED_DIV_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div[class]").expect("Invalid div selector"));
static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(config::SEL_CARD_TITLE).expect("Invalid title selector"));
static TITLE_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a").expect("Invalid anchor selector"));
static ARTIST_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(config::SEL_CARD_ARTIST).expect("Invalid artist selector"));
static DETAIL_LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse(config::SEL_DETAIL_LINK).expect("Invalid detail link selector"));

fn is_card(element_ref: &ElementRef<'_>) -> bool {
    element_ref
        .value()
        .attr("class")
        .is_some_and(|class| config::CARD_CLASS_RE.is_match(class))
}

fn detail_anchors<'a>(scope: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    scope
        .select(&DETAIL_LINK_SELECTOR)
        .filter(|a| has_exact_classes(*a, config::DETAIL_LINK_CLASSES))
}

fn card_title(card: ElementRef<'_>) -> String {
    card.select(&TITLE_SELECTOR)
        .next()
        .filter(|heading| heading.select(&TITLE_LINK_SELECTOR).next().is_some())
        .map(element_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| config::DEFAULT_TITLE.to_string())
}

fn card_artist(card: ElementRef<'_>) -> String {
    card.select(&ARTIST_SELECTOR)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| config::DEFAULT_ARTIST.to_string())
}

/// Splits a listing page into cards, in document order.
///
/// Each card's detail link is taken from inside the card when present.
/// Otherwise the Nth detail anchor on the page is paired with the Nth card.
/// A card with neither fails the whole page.
pub fn extract_cards(html: &str, page_url: &str) -> AppResult<Vec<ExtractedCard>> {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let page_links: Vec<&str> = detail_anchors(root)
        .map(|a| non_empty_attr(a, "href").unwrap_or(""))
        .collect();

    let mut cards = Vec::new();
    for (index, card) in document
        .select(&CLASSED_DIV_SELECTOR)
        .filter(is_card)
        .enumerate()
    {
        let own_link = detail_anchors(card).find_map(|a| non_empty_attr(a, "href"));

        let (href, link_source) = match own_link {
            Some(href) => (href, LinkSource::Card),
            None => match page_links.get(index).filter(|href| !href.is_empty()) {
                Some(href) => (*href, LinkSource::Position),
                None => {
                    return Err(AppError::missing_element(
                        format!("detail link for card #{}", index + 1),
                        page_url,
                    ))
                }
            },
        };

        cards.push(ExtractedCard {
            card: Card {
                title: card_title(card),
                artist: card_artist(card),
                detail_url: net::resolve_href(page_url, href)?,
            },
            link_source,
        });
    }

    Ok(cards)
}

use scraper::ElementRef;
use std::collections::HashSet;

#[inline]
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn element_text(element_ref: ElementRef<'_>) -> String {
    normalize_whitespace(&element_ref.text().collect::<String>())
}

/// True when the element's class list is exactly `expected`, in any order.
pub(crate) fn has_exact_classes(element_ref: ElementRef<'_>, expected: &[&str]) -> bool {
    let actual: HashSet<&str> = element_ref.value().classes().collect();
    let wanted: HashSet<&str> = expected.iter().copied().collect();
    actual == wanted
}

pub(crate) fn non_empty_attr<'a>(element_ref: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element_ref
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

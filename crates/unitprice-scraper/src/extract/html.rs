//! Source 3: common markup patterns (`itemprop`, product classes, first `h1`)
//! plus the CSS-selector helpers the retailer strategies share.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};
use unitprice_core::ExtractedProductData;

use super::text::parse_price_text;
use crate::blocked::usable_name;

pub(super) fn selectors(list: &[&str]) -> Vec<Selector> {
    list.iter()
        .map(|s| Selector::parse(s).expect("valid selector"))
        .collect()
}

static NAME_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[
        r#"[itemprop="name"]"#,
        ".product-title",
        ".product-name",
        "h1",
    ])
});
static PRICE_SELECTORS: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    selectors(&[r#"[itemprop="price"]"#, ".price", "[data-price]"])
});

/// Extract name and price from common product markup.
///
/// For each field the selectors are tried in priority order and only the
/// first element found is considered.
pub(super) fn extract_html_patterns(document: &Html) -> ExtractedProductData {
    let name = usable_name(first_match(document, &NAME_SELECTORS).map(element_text));
    let price = first_match(document, &PRICE_SELECTORS).and_then(element_price);

    ExtractedProductData {
        name,
        price,
        ..Default::default()
    }
}

/// The first element matched by the earliest selector in `list` that
/// matches anything.
pub(super) fn first_match<'a>(document: &'a Html, list: &[Selector]) -> Option<ElementRef<'a>> {
    list.iter().find_map(|sel| document.select(sel).next())
}

/// Whitespace-collapsed text content of `el`.
pub(super) fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Price carried by `el`: its `content` attribute, then `data-price`, then
/// its text.
fn element_price(el: ElementRef<'_>) -> Option<Decimal> {
    let attrs = ["content", "data-price"];
    attrs
        .iter()
        .filter_map(|a| el.value().attr(a))
        .find(|v| !v.trim().is_empty())
        .map_or_else(|| parse_price_text(&element_text(el)), parse_price_text)
}

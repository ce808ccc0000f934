//! Source 2: Open Graph / product meta tags.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use unitprice_core::ExtractedProductData;

use super::text::parse_price_text;
use crate::blocked::usable_name;

static META_PROPERTY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta[property][content]").expect("valid selector"));

const TITLE_PROPERTIES: &[&str] = &["og:title"];
const PRICE_PROPERTIES: &[&str] = &["product:price:amount", "og:price:amount"];

/// Extract name and price from `og:title` and `product:price:amount` meta tags.
pub(super) fn extract_open_graph(document: &Html) -> ExtractedProductData {
    let name = usable_name(find_meta_content(document, TITLE_PROPERTIES));
    let price = find_meta_content(document, PRICE_PROPERTIES)
        .as_deref()
        .and_then(parse_price_text);

    ExtractedProductData {
        name,
        price,
        ..Default::default()
    }
}

/// Content of the first meta tag whose `property` matches one of `keys`,
/// trying `keys` in order.
fn find_meta_content(document: &Html, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        document.select(&META_PROPERTY).find_map(|el| {
            let property = el.value().attr("property")?;
            if !property.eq_ignore_ascii_case(key) {
                return None;
            }
            let content = el.value().attr("content")?.trim();
            (!content.is_empty()).then(|| content.to_string())
        })
    })
}

//! Source 1: schema.org `Product` JSON-LD.

use std::sync::LazyLock;

use regex::Regex;
use unitprice_core::ExtractedProductData;

use super::text::price_from_json;
use crate::blocked::usable_name;

static LD_JSON_SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]+type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("valid regex")
});

/// Extract name and price from `<script type="application/ld+json">` blocks.
///
/// Malformed blocks are skipped. When several `Product` items exist, the
/// later item overrides each field it supplies.
pub(super) fn extract_jsonld_product(html: &str) -> ExtractedProductData {
    let mut data = ExtractedProductData::default();

    for cap in LD_JSON_SCRIPT_RE.captures_iter(html) {
        let Some(json_text) = cap.get(1).map(|m| m.as_str().trim()) else {
            continue;
        };

        let value: serde_json::Value = match serde_json::from_str(json_text) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed JSON-LD block");
                continue;
            }
        };

        for item in candidate_items(value) {
            if let Some(mut product) = jsonld_item_to_product(&item) {
                product.fill_missing(std::mem::take(&mut data));
                data = product;
            }
        }
    }

    data
}

/// Flattens a JSON-LD document into candidate items: a top-level object,
/// every element of a top-level array, and the members of any `@graph`.
fn candidate_items(value: serde_json::Value) -> Vec<serde_json::Value> {
    let mut candidates = match value {
        serde_json::Value::Array(items) => items,
        other => vec![other],
    };

    let mut expanded = Vec::new();
    for item in &candidates {
        if let Some(graph) = item.get("@graph").and_then(serde_json::Value::as_array) {
            expanded.extend(graph.iter().cloned());
        }
    }
    candidates.extend(expanded);
    candidates
}

/// `@type` may be a plain string or an array of strings. Anything containing
/// `"Product"` (e.g. `"ProductGroup"`) counts.
fn is_product_type(item: &serde_json::Value) -> bool {
    match item.get("@type") {
        Some(serde_json::Value::String(s)) => s.contains("Product"),
        Some(serde_json::Value::Array(types)) => types
            .iter()
            .filter_map(serde_json::Value::as_str)
            .any(|s| s.contains("Product")),
        _ => false,
    }
}

fn jsonld_item_to_product(item: &serde_json::Value) -> Option<ExtractedProductData> {
    if !is_product_type(item) {
        return None;
    }

    let name = usable_name(
        item.get("name")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
    );

    // `offers` is either a single Offer/AggregateOffer or a list; only the
    // first offer is considered.
    let offer = item.get("offers").and_then(|offers| match offers {
        serde_json::Value::Array(list) => list.first(),
        other => Some(other),
    });
    let price = offer.and_then(|o| {
        o.get("price")
            .and_then(price_from_json)
            .or_else(|| o.get("lowPrice").and_then(price_from_json))
    });

    Some(ExtractedProductData {
        name,
        price,
        ..Default::default()
    })
}

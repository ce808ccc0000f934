//! Walmart product pages.
//!
//! Walmart renders with Next.js, which serializes page state into a
//! `__NEXT_DATA__` script. The product object moves around between page
//! templates, so its location is probed through [`PRODUCT_PATHS`].

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use unitprice_core::ExtractedProductData;

use super::generic::extract_generic;
use super::text::{extract_attributes_from_text, price_from_json};
use crate::blocked::usable_name;

static NEXT_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]*\bid\s*=\s*["']__NEXT_DATA__["'][^>]*>(.*?)</script>"#)
        .expect("valid regex")
});

/// JSON pointers to the product object inside `__NEXT_DATA__`, tried in
/// order. Schema drift means adding a path here.
const PRODUCT_PATHS: &[&str] = &[
    "/props/pageProps/initialData/data/product",
    "/props/pageProps/initialState/product",
    "/props/pageProps/product",
];

/// Price locations inside the product object, in priority order.
const PRICE_PATHS: &[&str] = &[
    "/priceInfo/currentPrice/price",
    "/priceInfo/price",
    "/offers/price",
];

const DESCRIPTION_FIELDS: &[&str] = &["shortDescription", "description", "longDescription"];

/// Extracts from the embedded Next.js payload, then backfills any missing
/// field from the generic strategy when the payload gave no usable name.
pub(crate) fn extract_walmart(html: &str) -> ExtractedProductData {
    let mut data = next_data_product(html)
        .map(|product| product_to_data(&product))
        .unwrap_or_default();

    if data.name.is_none() {
        tracing::debug!(
            found = ?data.present_fields(),
            "Walmart payload gave no usable name; backfilling from generic extraction"
        );
        data.fill_missing(extract_generic(html));
        data.name = usable_name(data.name);
    }

    data
}

/// Parses `__NEXT_DATA__` and returns the first product object found.
/// Absent or malformed payloads yield `None`.
fn next_data_product(html: &str) -> Option<Value> {
    let raw = NEXT_DATA_RE.captures(html)?.get(1)?.as_str();
    let payload: Value = match serde_json::from_str(raw.trim()) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "malformed __NEXT_DATA__ payload");
            return None;
        }
    };
    find_product(&payload).cloned()
}

/// Returns the value at the first path in [`PRODUCT_PATHS`] that resolves to
/// a JSON object.
fn find_product(payload: &Value) -> Option<&Value> {
    PRODUCT_PATHS
        .iter()
        .filter_map(|path| payload.pointer(path))
        .find(|v| v.is_object())
}

fn product_to_data(product: &Value) -> ExtractedProductData {
    let name = usable_name(product.get("name").and_then(Value::as_str).map(str::to_string));

    let price = PRICE_PATHS
        .iter()
        .filter_map(|path| product.pointer(path))
        .find_map(price_from_json);

    let mut description = name.clone().unwrap_or_default();
    for field in DESCRIPTION_FIELDS {
        if let Some(text) = product.get(*field).and_then(Value::as_str) {
            description.push(' ');
            description.push_str(text);
        }
    }
    if let Some(specs) = product.get("specifications").and_then(Value::as_array) {
        for spec in specs {
            let spec_name = spec.get("name").and_then(Value::as_str).unwrap_or_default();
            let spec_value = spec.get("value").and_then(Value::as_str).unwrap_or_default();
            description.push_str(&format!(" {spec_name}: {spec_value}"));
        }
    }

    let mut data = ExtractedProductData {
        name,
        price,
        ..Default::default()
    };
    data.fill_missing(extract_attributes_from_text(&description));
    data
}

#[cfg(test)]
#[path = "walmart_test.rs"]
mod tests;

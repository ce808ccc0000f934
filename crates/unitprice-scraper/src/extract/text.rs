//! Free-text heuristics shared by every extraction strategy.
//!
//! Each attribute is matched independently and the first match wins; a
//! missing match leaves the field `None`.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use unitprice_core::ExtractedProductData;

/// `"20 Triple Rolls"`, `"12 mega rolls"`, `"6 rolls"`: any words may sit
/// between the count and "roll(s)".
static ROLL_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s+(?:\w+\s+)*rolls?\b").expect("valid roll count regex")
});
/// `"198 sheets per roll"`, `"300 sheets/roll"`.
static SHEETS_PER_ROLL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+)\s*sheets?\s*(?:per|/)\s*roll").expect("valid sheets regex")
});
/// `"4.0 x 4.0 inches"`, `"4.5×3.9 in"`, `"4" x 4""`.
static DIMENSIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(\d+\.?\d*)\s*["”]?\s*[x×]\s*(\d+\.?\d*)\s*(?:inches|inch|in\b|"|”|'')?"#)
        .expect("valid dimensions regex")
});
static DOLLAR_PRICE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\s*(\d+\.?\d{0,2})").expect("valid dollar price regex"));
static PRICE_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$?\s*(\d+\.?\d*)").expect("valid price text regex"));

/// Runs every free-text heuristic over `text`.
#[must_use]
pub fn extract_from_text(text: &str) -> ExtractedProductData {
    let (sheet_width, sheet_height) = parse_dimensions(text).unzip();
    ExtractedProductData {
        name: None,
        price: parse_dollar_price(text),
        roll_count: parse_roll_count(text),
        sheets_per_roll: parse_sheets_per_roll(text),
        sheet_width,
        sheet_height,
    }
}

/// Like [`extract_from_text`] but never fills `price`. Used over product
/// detail blobs, where stray dollar amounts (unit prices, savings) are
/// common and the strategy has a better price source.
#[must_use]
pub fn extract_attributes_from_text(text: &str) -> ExtractedProductData {
    ExtractedProductData {
        price: None,
        ..extract_from_text(text)
    }
}

fn parse_roll_count(text: &str) -> Option<u32> {
    first_positive_int(&ROLL_COUNT_RE, text)
}

fn parse_sheets_per_roll(text: &str) -> Option<u32> {
    first_positive_int(&SHEETS_PER_ROLL_RE, text)
}

fn first_positive_int(re: &Regex, text: &str) -> Option<u32> {
    let caps = re.captures(text)?;
    caps.get(1)?
        .as_str()
        .parse::<u32>()
        .ok()
        .filter(|v| *v > 0)
}

fn parse_dimensions(text: &str) -> Option<(f64, f64)> {
    let caps = DIMENSIONS_RE.captures(text)?;
    let width = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let height = caps.get(2)?.as_str().parse::<f64>().ok()?;
    (width > 0.0 && height > 0.0).then_some((width, height))
}

fn parse_dollar_price(text: &str) -> Option<Decimal> {
    let caps = DOLLAR_PRICE_RE.captures(text)?;
    positive_decimal(caps.get(1)?.as_str())
}

/// Reads the first number out of a price label such as `"$1,299.99"` or
/// `"Now 12.50"`. Thousands separators are ignored.
#[must_use]
pub fn parse_price_text(text: &str) -> Option<Decimal> {
    let cleaned = text.replace(',', "");
    let caps = PRICE_TEXT_RE.captures(&cleaned)?;
    positive_decimal(caps.get(1)?.as_str())
}

/// Reads a price out of a JSON value that may be a number or a string.
#[must_use]
pub fn price_from_json(value: &serde_json::Value) -> Option<Decimal> {
    match value {
        serde_json::Value::Number(n) => positive_decimal(&n.to_string()),
        serde_json::Value::String(s) => parse_price_text(s),
        _ => None,
    }
}

fn positive_decimal(raw: &str) -> Option<Decimal> {
    let raw = raw.trim_end_matches('.');
    Decimal::from_str(raw)
        .ok()
        .filter(|d| d.is_sign_positive() && !d.is_zero())
}

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;

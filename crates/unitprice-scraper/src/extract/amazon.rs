//! Amazon product pages.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use unitprice_core::ExtractedProductData;

use super::generic::extract_generic;
use super::html::{element_text, selectors};
use super::text::{extract_attributes_from_text, parse_price_text};
use crate::blocked::usable_name;

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#productTitle").expect("valid selector"));

/// Price locations, most specific first. Amazon moves the buy-box price
/// between these depending on page template and deal state.
const PRICE_SELECTORS: &[&str] = &[
    "#corePrice_feature_div .a-offscreen",
    "#priceblock_ourprice",
    "#priceblock_dealprice",
    ".a-price .a-offscreen",
    "#apex_offerDisplay_desktop .a-offscreen",
    r#"[data-a-color="price"] .a-offscreen"#,
];

/// Regions whose text usually carries count, sheet, and size details.
const DETAIL_SELECTORS: &[&str] = &[
    "#productDetails_techSpec_section_1",
    "#detailBullets_feature_div",
    "#feature-bullets",
    "#productDescription",
    "#aplus",
];

static PRICES: LazyLock<Vec<Selector>> = LazyLock::new(|| selectors(PRICE_SELECTORS));
static DETAILS: LazyLock<Vec<Selector>> = LazyLock::new(|| selectors(DETAIL_SELECTORS));

/// Title and buy-box price from their dedicated elements; roll and sheet
/// details from the title plus the product detail regions. Falls back to
/// the generic strategy wholesale when neither title nor price is found.
pub(crate) fn extract_amazon(html: &str) -> ExtractedProductData {
    let document = Html::parse_document(html);

    let name = usable_name(document.select(&TITLE).next().map(element_text));

    // First selector whose element text actually holds a number wins.
    let price = PRICES.iter().find_map(|sel| {
        document
            .select(sel)
            .next()
            .and_then(|el| parse_price_text(&element_text(el)))
    });

    if name.is_none() && price.is_none() {
        tracing::debug!("no Amazon title or price found; using generic extraction");
        return extract_generic(html);
    }

    let mut detail_text = name.clone().unwrap_or_default();
    for sel in DETAILS.iter() {
        if let Some(el) = document.select(sel).next() {
            detail_text.push(' ');
            detail_text.push_str(&element_text(el));
        }
    }

    let mut data = ExtractedProductData {
        name,
        price,
        ..Default::default()
    };
    data.fill_missing(extract_attributes_from_text(&detail_text));
    data
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    const PRODUCT_PAGE: &str = r#"
        <html><body>
          <span id="productTitle">
            Charmin Ultra Soft Toilet Paper, 18 Mega Rolls
          </span>
          <div id="corePrice_feature_div">
            <span class="a-price"><span class="a-offscreen">$27.99</span></span>
          </div>
          <div id="feature-bullets"><ul>
            <li>264 sheets per roll</li>
            <li>Sheet size 4 x 3.92 inches</li>
          </ul></div>
          <div class="a-price"><span class="a-offscreen">$0.44/100 sheets</span></div>
        </body></html>
    "#;

    #[test]
    fn extracts_title_price_and_details() {
        let data = extract_amazon(PRODUCT_PAGE);
        assert_eq!(
            data.name.as_deref(),
            Some("Charmin Ultra Soft Toilet Paper, 18 Mega Rolls")
        );
        assert_eq!(data.price, Some(Decimal::new(2799, 2)));
        assert_eq!(data.roll_count, Some(18));
        assert_eq!(data.sheets_per_roll, Some(264));
        assert_eq!(data.sheet_width, Some(4.0));
        assert_eq!(data.sheet_height, Some(3.92));
    }

    #[test]
    fn price_selector_order_is_respected() {
        let html = r#"
            <span id="productTitle">Scott 1000</span>
            <span id="priceblock_dealprice">$9.00</span>
            <span id="priceblock_ourprice">$11.50</span>
        "#;
        let data = extract_amazon(html);
        assert_eq!(data.price, Some(Decimal::new(1150, 2)));
    }

    #[test]
    fn empty_price_element_falls_through_to_next_selector() {
        let html = r#"
            <span id="productTitle">Scott 1000</span>
            <div id="corePrice_feature_div"><span class="a-offscreen"></span></div>
            <span id="priceblock_ourprice">$11.50</span>
        "#;
        let data = extract_amazon(html);
        assert_eq!(data.price, Some(Decimal::new(1150, 2)));
    }

    #[test]
    fn price_only_page_still_uses_amazon_strategy() {
        let html = r#"
            <span id="priceblock_ourprice">$5.25</span>
            <meta property="og:title" content="Should not be used">
        "#;
        let data = extract_amazon(html);
        assert_eq!(data.price, Some(Decimal::new(525, 2)));
        assert_eq!(data.name, None);
    }

    #[test]
    fn falls_back_to_generic_without_title_or_price() {
        let html = r#"
            <script type="application/ld+json">{"@type": "Product", "name": "Presto! 24 Family Mega Rolls", "offers": {"price": "31.49"}}</script>
        "#;
        let data = extract_amazon(html);
        assert_eq!(data.name.as_deref(), Some("Presto! 24 Family Mega Rolls"));
        assert_eq!(data.price, Some(Decimal::new(3149, 2)));
        assert_eq!(data.roll_count, Some(24));
    }
}

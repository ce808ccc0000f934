//! Generic strategy: structured metadata first, heuristics last.

use scraper::Html;
use unitprice_core::ExtractedProductData;

use super::html::extract_html_patterns;
use super::jsonld::extract_jsonld_product;
use super::meta::extract_open_graph;
use super::text::extract_from_text;

/// Runs all four generic sources and merges them in priority order:
/// JSON-LD, Open Graph, HTML patterns, free text over the raw HTML.
/// An earlier source's field is never overwritten by a later one.
pub(crate) fn extract_generic(html: &str) -> ExtractedProductData {
    let document = Html::parse_document(html);

    let jsonld = extract_jsonld_product(html);
    let open_graph = extract_open_graph(&document);
    let patterns = extract_html_patterns(&document);
    let free_text = extract_from_text(html);

    tracing::trace!(
        jsonld = ?jsonld.present_fields(),
        open_graph = ?open_graph.present_fields(),
        patterns = ?patterns.present_fields(),
        free_text = ?free_text.present_fields(),
        "generic extraction sources"
    );

    ExtractedProductData::merge_in_priority([jsonld, open_graph, patterns, free_text])
}

//! Extraction strategies, one per [`RetailerCategory`].
//!
//! Every strategy is a pure function of the HTML: no I/O, no shared state.

mod amazon;
mod generic;
mod html;
mod jsonld;
mod meta;
pub mod text;
mod walmart;

use unitprice_core::ExtractedProductData;

use crate::blocked::usable_name;
use crate::retailer::RetailerCategory;

pub use text::extract_from_text;

/// Runs the strategy for `category` over `html`.
///
/// The returned name has passed the bot-placeholder filter regardless of
/// which strategy or fallback produced it.
#[must_use]
pub fn extract(html: &str, category: RetailerCategory) -> ExtractedProductData {
    let mut data = match category {
        RetailerCategory::Amazon => amazon::extract_amazon(html),
        RetailerCategory::Walmart => walmart::extract_walmart(html),
        RetailerCategory::Generic => generic::extract_generic(html),
    };
    data.name = usable_name(data.name);

    tracing::debug!(
        retailer = %category,
        fields = ?data.present_fields(),
        "extraction finished"
    );
    data
}

use thiserror::Error;

use crate::relay::RelayFailure;
use crate::retailer::RetailerCategory;

/// Every way a product-URL parse can fail.
///
/// The `Display` text of each variant is the message shown to the user, so
/// wording changes here are user-visible.
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Please enter a valid URL")]
    InvalidUrl { url: String },

    #[error("Failed to fetch URL: {}", join_failures(.failures))]
    RelaysExhausted { failures: Vec<RelayFailure> },

    #[error("This retailer appears to have blocked automated access (bot protection). Try again later or paste product details manually.")]
    Blocked { retailer: RetailerCategory },

    #[error("{}", unitprice_core::NO_PRODUCT_DATA_MESSAGE)]
    NoProductData,

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

fn join_failures(failures: &[RelayFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

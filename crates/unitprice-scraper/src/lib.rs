pub mod blocked;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod relay;
pub mod retailer;
pub mod warnings;

pub use blocked::looks_blocked;
pub use error::ScraperError;
pub use extract::{extract, extract_from_text};
pub use pipeline::{parse_html, ProductUrlParser};
pub use relay::{RelayEndpoint, RelayFailure, RelayFetcher, DEFAULT_RELAYS};
pub use retailer::{classify, RetailerCategory};
pub use warnings::build_warnings;

pub use unitprice_core::{ExtractedProductData, ParseOutcome, ProductField};

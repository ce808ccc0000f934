//! Orchestrates one product-URL parse end to end.

use unitprice_core::{AppConfig, ExtractedProductData, ParseOutcome};

use crate::blocked::looks_blocked;
use crate::error::ScraperError;
use crate::extract::extract;
use crate::relay::{RelayEndpoint, RelayFetcher};
use crate::retailer::classify;
use crate::warnings::build_warnings;

/// Turns product URLs into [`ParseOutcome`]s.
///
/// Holds only an immutable relay fetcher, so a single instance can be shared
/// across concurrent parses.
#[derive(Debug, Clone)]
pub struct ProductUrlParser {
    fetcher: RelayFetcher,
}

impl ProductUrlParser {
    #[must_use]
    pub fn new(fetcher: RelayFetcher) -> Self {
        Self { fetcher }
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Ok(Self::new(RelayFetcher::from_config(config)?))
    }

    /// Convenience constructor over an explicit relay list.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn with_relays(
        timeout_secs: u64,
        user_agent: &str,
        relays: Vec<RelayEndpoint>,
    ) -> Result<Self, ScraperError> {
        Ok(Self::new(RelayFetcher::new(timeout_secs, user_agent, relays)?))
    }

    /// Validates `url`, fetches it through the relays, and extracts product
    /// data. Never fails: every error becomes an unsuccessful outcome.
    pub async fn parse_product_url(&self, url: &str) -> ParseOutcome {
        let url = url.trim();
        let result = self.fetch_and_extract(url).await;
        into_outcome(url, result)
    }

    async fn fetch_and_extract(&self, url: &str) -> Result<ExtractedProductData, ScraperError> {
        validate_url(url)?;
        let html = self.fetcher.fetch_via_relay(url).await?;
        extract_product(url, &html)
    }
}

/// Runs classification, bot detection, and extraction over HTML that was
/// already fetched for `url`.
#[must_use]
pub fn parse_html(url: &str, html: &str) -> ParseOutcome {
    into_outcome(url, extract_product(url, html))
}

/// Accepts any well-formed absolute URL. Whether a relay can actually fetch
/// it is left to the relay.
fn validate_url(url: &str) -> Result<(), ScraperError> {
    reqwest::Url::parse(url)
        .map(|_| ())
        .map_err(|_| ScraperError::InvalidUrl {
            url: url.to_owned(),
        })
}

fn extract_product(url: &str, html: &str) -> Result<ExtractedProductData, ScraperError> {
    let retailer = classify(url);

    if looks_blocked(html) {
        return Err(ScraperError::Blocked { retailer });
    }

    let data = extract(html, retailer);
    if data.is_empty() {
        return Err(ScraperError::NoProductData);
    }
    Ok(data)
}

fn into_outcome(url: &str, result: Result<ExtractedProductData, ScraperError>) -> ParseOutcome {
    match result {
        Ok(data) => {
            let warnings = build_warnings(&data, &data.present_fields());
            tracing::info!(url, fields = ?data.present_fields(), warnings = warnings.len(), "parsed product page");
            ParseOutcome::succeeded(data, warnings)
        }
        Err(e) => {
            match &e {
                ScraperError::InvalidUrl { .. } => {
                    tracing::debug!(url, "rejected malformed product URL");
                }
                ScraperError::Blocked { retailer } => {
                    tracing::warn!(url, %retailer, "retailer served a bot-protection page");
                }
                _ => tracing::warn!(url, error = %e, "product page parse failed"),
            }
            ParseOutcome::failed(e.to_string())
        }
    }
}

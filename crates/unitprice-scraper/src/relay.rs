//! Relay fetcher: retrieves third-party product pages through public
//! CORS relays.
//!
//! Relays are tried strictly in order, each exactly once. A relay counts as
//! failed on a non-2xx status, a transport error, or a body too short to be a
//! real page (relays often answer `200 OK` with a tiny error document).

use std::borrow::Cow;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use unitprice_core::{AppConfig, RelayOverride};

use crate::error::ScraperError;

/// Bodies at or below this many bytes are treated as relay error pages.
pub const MIN_BODY_LEN: usize = 100;

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Characters left unescaped by JavaScript's `encodeURIComponent`; relays
/// expect the target URL encoded exactly that way.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A relay endpoint template. The proxied URL is `prefix` followed by the
/// percent-encoded target URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayEndpoint {
    pub name: Cow<'static, str>,
    pub prefix: Cow<'static, str>,
}

impl RelayEndpoint {
    #[must_use]
    pub fn new(name: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            prefix: Cow::Owned(prefix.into()),
        }
    }

    /// Builds the request URL that asks this relay for `target_url`.
    #[must_use]
    pub fn proxied_url(&self, target_url: &str) -> String {
        format!(
            "{}{}",
            self.prefix,
            utf8_percent_encode(target_url, URI_COMPONENT)
        )
    }
}

impl From<&RelayOverride> for RelayEndpoint {
    fn from(value: &RelayOverride) -> Self {
        Self::new(value.name.clone(), value.prefix.clone())
    }
}

/// Built-in relays, in the order they are tried.
pub const DEFAULT_RELAYS: &[RelayEndpoint] = &[
    RelayEndpoint {
        name: Cow::Borrowed("allorigins"),
        prefix: Cow::Borrowed("https://api.allorigins.win/raw?url="),
    },
    RelayEndpoint {
        name: Cow::Borrowed("corsproxy"),
        prefix: Cow::Borrowed("https://corsproxy.io/?"),
    },
];

/// Why a single relay attempt was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayFailure {
    Status { relay: String, status: u16 },
    BodyTooShort { relay: String, len: usize },
    Transport { relay: String, message: String },
}

impl std::fmt::Display for RelayFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayFailure::Status { relay, status } => {
                write!(f, "{relay} returned HTTP {status}")
            }
            RelayFailure::BodyTooShort { relay, len } => {
                write!(f, "{relay} returned an empty or too short response ({len} bytes)")
            }
            RelayFailure::Transport { relay, message } => write!(f, "{relay}: {message}"),
        }
    }
}

/// Fetches raw HTML for arbitrary URLs through an ordered relay list.
///
/// Holds no per-request state, so one instance can serve overlapping calls.
#[derive(Debug, Clone)]
pub struct RelayFetcher {
    client: Client,
    relays: Vec<RelayEndpoint>,
}

impl RelayFetcher {
    /// Creates a fetcher over `relays` with the given request timeout and
    /// `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        relays: Vec<RelayEndpoint>,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, relays })
    }

    /// Creates a fetcher from application config, using the configured relay
    /// overrides or [`DEFAULT_RELAYS`] when none are set.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let relays = if config.relays.is_empty() {
            DEFAULT_RELAYS.to_vec()
        } else {
            config.relays.iter().map(RelayEndpoint::from).collect()
        };
        Self::new(config.fetch_timeout_secs, &config.user_agent, relays)
    }

    #[must_use]
    pub fn relays(&self) -> &[RelayEndpoint] {
        &self.relays
    }

    /// Returns the HTML body of `url` from the first relay that produces a
    /// usable response.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::RelaysExhausted`] carrying one
    /// [`RelayFailure`] per relay, in order, when every relay fails.
    pub async fn fetch_via_relay(&self, url: &str) -> Result<String, ScraperError> {
        let mut failures = Vec::with_capacity(self.relays.len());

        for relay in &self.relays {
            match self.try_relay(relay, url).await {
                Ok(body) => {
                    tracing::debug!(relay = %relay.name, url, bytes = body.len(), "relay fetch succeeded");
                    return Ok(body);
                }
                Err(failure) => {
                    tracing::warn!(relay = %relay.name, url, reason = %failure, "relay fetch failed; trying next relay");
                    failures.push(failure);
                }
            }
        }

        Err(ScraperError::RelaysExhausted { failures })
    }

    async fn try_relay(&self, relay: &RelayEndpoint, url: &str) -> Result<String, RelayFailure> {
        let proxied = relay.proxied_url(url);
        let transport = |err: reqwest::Error| RelayFailure::Transport {
            relay: relay.name.to_string(),
            message: err.to_string(),
        };

        let response = self
            .client
            .get(&proxied)
            .header(reqwest::header::ACCEPT, ACCEPT_HTML)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayFailure::Status {
                relay: relay.name.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(transport)?;
        if body.len() <= MIN_BODY_LEN {
            return Err(RelayFailure::BodyTooShort {
                relay: relay.name.to_string(),
                len: body.len(),
            });
        }

        Ok(body)
    }
}

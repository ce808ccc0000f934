#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// A relay override read from `UNITPRICE_RELAYS`, e.g. `"mirror=https://relay.example/?url="`.
///
/// The proxied request URL is `prefix` followed by the percent-encoded target URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOverride {
    pub name: String,
    pub prefix: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    /// Replaces the built-in relay list when non-empty. Order is preserved.
    pub relays: Vec<RelayOverride>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field(
                "relays",
                &self.relays.iter().map(|r| r.name.as_str()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

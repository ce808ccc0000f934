pub mod app_config;
pub mod config;
pub mod outcome;
pub mod product;

pub use app_config::{AppConfig, Environment, RelayOverride};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_USER_AGENT};
pub use outcome::{ParseOutcome, NO_PRODUCT_DATA_MESSAGE};
pub use product::{ExtractedProductData, ProductField};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

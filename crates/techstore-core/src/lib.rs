mod app_config;
pub mod category;
mod config;
pub mod product;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use category::{category_label, Category};
pub use config::{load_app_config, load_app_config_from_env};
pub use product::{Product, StockStatus, MAX_RATING_ICONS};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

pub mod app_config;
pub mod config;
pub mod display;
pub mod matcher;
pub mod product;
pub mod promotion;
pub mod quantity;

#[cfg(test)]
mod test_support;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use display::{format_money, stock_label, AddButton, PriceDisplay};
pub use matcher::{is_complete, match_variant, option_keys, option_values, VariantMatch};
pub use product::{OptionKey, Product, SelectedOptions, Variant};
pub use promotion::{PromotionOutcome, PromotionRule};
pub use quantity::Quantity;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid option key \"{0}\": expected option1, option2 or option3")]
    InvalidOptionKey(String),
}

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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_url: String,
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Handle or id of the product bundled by the promotion rule. `None`
    /// disables the rule.
    pub promo_product: Option<String>,
    pub promo_first_value: String,
    pub promo_second_value: String,
}

impl AppConfig {
    /// Builds the promotion rule described by this configuration, if a
    /// secondary product is configured.
    #[must_use]
    pub fn promotion_rule(&self) -> Option<crate::PromotionRule> {
        self.promo_product.as_ref().map(|product_ref| {
            crate::PromotionRule::new(
                &self.promo_first_value,
                &self.promo_second_value,
                product_ref,
            )
        })
    }
}

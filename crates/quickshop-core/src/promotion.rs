//! Cross-sell rule: when the shopper co-selects two configured option values
//! in the first two slots (either order), a secondary product is bundled into
//! the cart after the primary add succeeds.

use serde::{Deserialize, Serialize};

use crate::product::{OptionKey, SelectedOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionRule {
    first_value: String,
    second_value: String,
    product_ref: String,
}

impl PromotionRule {
    #[must_use]
    pub fn new(first_value: &str, second_value: &str, product_ref: &str) -> Self {
        Self {
            first_value: first_value.to_owned(),
            second_value: second_value.to_owned(),
            product_ref: product_ref.to_owned(),
        }
    }

    #[must_use]
    pub fn first_value(&self) -> &str {
        &self.first_value
    }

    #[must_use]
    pub fn second_value(&self) -> &str {
        &self.second_value
    }

    /// Handle or id of the product to bundle.
    #[must_use]
    pub fn product_ref(&self) -> &str {
        &self.product_ref
    }

    /// `true` when `option1`/`option2` hold the two trigger values in either
    /// order.
    #[must_use]
    pub fn applies(&self, selected: &SelectedOptions) -> bool {
        let (Some(a), Some(b)) = (
            selected.get(OptionKey::Option1),
            selected.get(OptionKey::Option2),
        ) else {
            return false;
        };
        let (first, second) = (self.first_value.as_str(), self.second_value.as_str());
        (a == first && b == second) || (a == second && b == first)
    }
}

/// What happened to the secondary add after a successful primary add.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PromotionOutcome {
    NotApplicable,
    Added { variant_id: i64 },
    Failed,
}

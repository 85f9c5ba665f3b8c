//! Labels derived from the resolved variant: price, stock, and the state of
//! the add-to-cart button.

use serde::{Deserialize, Serialize};

use crate::product::Variant;

/// State of the add-to-cart button for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddButton {
    AddToCart,
    SoldOut,
    Unavailable,
}

impl AddButton {
    /// Button state for an optionally resolved variant.
    #[must_use]
    pub fn for_variant(variant: Option<&Variant>) -> Self {
        match variant {
            Some(v) if v.available => AddButton::AddToCart,
            Some(_) => AddButton::SoldOut,
            None => AddButton::Unavailable,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AddButton::AddToCart => "ADD TO CART",
            AddButton::SoldOut => "SOLD OUT",
            AddButton::Unavailable => "UNAVAILABLE",
        }
    }

    #[must_use]
    pub fn is_enabled(self) -> bool {
        matches!(self, AddButton::AddToCart)
    }
}

impl std::fmt::Display for AddButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Formatted price of a variant, with the compare-at price only when it is a
/// real markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceDisplay {
    pub price: String,
    pub compare_at: Option<String>,
}

impl PriceDisplay {
    #[must_use]
    pub fn for_variant(variant: &Variant) -> Self {
        let compare_at = variant
            .compare_at_price
            .filter(|compare| *compare > variant.price)
            .map(format_money);
        Self {
            price: format_money(variant.price),
            compare_at,
        }
    }

    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.compare_at.is_some()
    }
}

/// Formats minor currency units as a dollar amount, e.g. `1999` → `"$19.99"`.
#[must_use]
pub fn format_money(minor_units: i64) -> String {
    let sign = if minor_units < 0 { "-" } else { "" };
    let abs = minor_units.unsigned_abs();
    format!("{sign}${}.{:02}", abs / 100, abs % 100)
}

/// Stock label for a variant.
#[must_use]
pub fn stock_label(variant: &Variant) -> String {
    if !variant.available {
        "Out of stock".to_string()
    } else if variant.inventory_quantity > 0 {
        format!("{} in stock", variant.inventory_quantity)
    } else {
        "In stock".to_string()
    }
}

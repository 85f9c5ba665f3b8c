//! Product and variant model shared by the storefront client and the
//! quick-view controller.
//!
//! Prices are integer minor-currency units (cents), exactly as the storefront
//! AJAX endpoints report them.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// One of the three option slots a product's variants vary along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKey {
    Option1,
    Option2,
    Option3,
}

impl OptionKey {
    pub const ALL: [OptionKey; 3] = [OptionKey::Option1, OptionKey::Option2, OptionKey::Option3];

    /// Zero-based slot index, matching the position of the option name in
    /// [`Product::options`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            OptionKey::Option1 => 0,
            OptionKey::Option2 => 1,
            OptionKey::Option3 => 2,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::Option1 => "option1",
            OptionKey::Option2 => "option2",
            OptionKey::Option3 => "option3",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "option1" => Ok(OptionKey::Option1),
            "option2" => Ok(OptionKey::Option2),
            "option3" => Ok(OptionKey::Option3),
            _ => Err(CoreError::InvalidOptionKey(s.to_owned())),
        }
    }
}

/// A product as shown in the quick-view popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    /// URL slug, e.g. `"classic-tee"`.
    pub handle: String,
    pub title: String,
    /// Raw HTML description; `None` when the store sends an empty string.
    pub description: Option<String>,
    /// Absolute URL of the featured image.
    pub featured_image: Option<String>,
    /// Option names in slot order, e.g. `["Color", "Size"]`.
    pub options: Vec<String>,
    pub variants: Vec<Variant>,
}

impl Product {
    #[must_use]
    pub fn variant(&self, variant_id: i64) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    #[must_use]
    pub fn first_variant(&self) -> Option<&Variant> {
        self.variants.first()
    }

    #[must_use]
    pub fn has_available_variants(&self) -> bool {
        self.variants.iter().any(|v| v.available)
    }

    /// Display name for an option slot, falling back to the key itself.
    #[must_use]
    pub fn option_name(&self, key: OptionKey) -> &str {
        self.options
            .get(key.index())
            .map_or_else(|| key.as_str(), String::as_str)
    }
}

/// A purchasable SKU of a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: i64,
    /// Display title, e.g. `"Black / Medium"` or `"Default Title"`.
    pub title: String,
    pub sku: Option<String>,
    pub option1: Option<String>,
    pub option2: Option<String>,
    pub option3: Option<String>,
    /// Price in minor currency units.
    pub price: i64,
    pub compare_at_price: Option<i64>,
    pub available: bool,
    /// Tracked inventory; `0` when the store does not track or expose it.
    pub inventory_quantity: i64,
}

impl Variant {
    #[must_use]
    pub fn option(&self, key: OptionKey) -> Option<&str> {
        match key {
            OptionKey::Option1 => self.option1.as_deref(),
            OptionKey::Option2 => self.option2.as_deref(),
            OptionKey::Option3 => self.option3.as_deref(),
        }
    }

    /// The variant's full option tuple in slot order.
    #[must_use]
    pub fn option_tuple(&self) -> [Option<&str>; 3] {
        OptionKey::ALL.map(|key| self.option(key))
    }
}

/// The shopper's current option choices, keyed by slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedOptions(BTreeMap<OptionKey, String>);

impl SelectedOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`. A blank value clears the slot.
    pub fn select(&mut self, key: OptionKey, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, value);
        }
    }

    pub fn unselect(&mut self, key: OptionKey) {
        self.0.remove(&key);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn get(&self, key: OptionKey) -> Option<&str> {
        self.0.get(&key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: OptionKey) -> bool {
        self.0.contains_key(&key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

impl<V: Into<String>> FromIterator<(OptionKey, V)> for SelectedOptions {
    fn from_iter<I: IntoIterator<Item = (OptionKey, V)>>(iter: I) -> Self {
        let mut selected = Self::new();
        for (key, value) in iter {
            selected.select(key, value);
        }
        selected
    }
}

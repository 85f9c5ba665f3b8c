//! Variant matching: maps the shopper's selected option values to a single
//! variant of the active product.
//!
//! A selected slot must equal the variant's value for that slot; unselected
//! slots act as wildcards. The match is unique when every candidate carries
//! the same option tuple. Duplicate tuples resolve to the first variant in list
//! order; distinct candidate tuples (an under-specified selection) are reported
//! as [`VariantMatch::Ambiguous`].

use crate::product::{OptionKey, Product, SelectedOptions, Variant};

/// Result of matching a selection against a product's variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantMatch<'a> {
    Found(&'a Variant),
    /// Several variants with different option tuples satisfy the selection.
    Ambiguous,
    NotFound,
}

impl<'a> VariantMatch<'a> {
    #[must_use]
    pub fn variant(self) -> Option<&'a Variant> {
        match self {
            VariantMatch::Found(variant) => Some(variant),
            VariantMatch::Ambiguous | VariantMatch::NotFound => None,
        }
    }
}

/// Finds the variant of `product` described by `selected`.
#[must_use]
pub fn match_variant<'a>(product: &'a Product, selected: &SelectedOptions) -> VariantMatch<'a> {
    let mut candidates = product
        .variants
        .iter()
        .filter(|variant| selected.iter().all(|(key, value)| variant.option(key) == Some(value)));

    let Some(first) = candidates.next() else {
        return VariantMatch::NotFound;
    };

    let tuple = first.option_tuple();
    if candidates.all(|other| other.option_tuple() == tuple) {
        VariantMatch::Found(first)
    } else {
        VariantMatch::Ambiguous
    }
}

/// Option slots that carry a value on at least one variant, in slot order.
#[must_use]
pub fn option_keys(product: &Product) -> Vec<OptionKey> {
    OptionKey::ALL
        .into_iter()
        .filter(|key| product.variants.iter().any(|v| v.option(*key).is_some()))
        .collect()
}

/// Distinct values offered for `key`, in first-seen order.
#[must_use]
pub fn option_values(product: &Product, key: OptionKey) -> Vec<&str> {
    let mut values: Vec<&str> = Vec::new();
    for value in product.variants.iter().filter_map(|v| v.option(key)) {
        if !values.contains(&value) {
            values.push(value);
        }
    }
    values
}

/// `true` when every option slot used by `product` has a selected value.
#[must_use]
pub fn is_complete(selected: &SelectedOptions, product: &Product) -> bool {
    option_keys(product)
        .into_iter()
        .all(|key| selected.contains(key))
}

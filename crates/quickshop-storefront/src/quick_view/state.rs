//! Per-open popup state and the view derived from it.

use quickshop_core::{
    is_complete, match_variant, option_keys, option_values, stock_label, AddButton, OptionKey,
    PriceDisplay, Product, Quantity, SelectedOptions, Variant,
};
use serde::Serialize;

use crate::error::StorefrontError;

pub(crate) const COMBINATION_UNAVAILABLE: &str = "This combination is unavailable";
pub(crate) const VARIANT_SOLD_OUT: &str = "This variant is sold out";

/// Everything the popup shows, recomputed from [`PopupState`] on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopupView {
    pub product_id: i64,
    pub handle: String,
    pub title: String,
    pub description: Option<String>,
    pub featured_image: Option<String>,
    pub options: Vec<OptionView>,
    pub variant_id: Option<i64>,
    pub price: Option<PriceDisplay>,
    pub stock: Option<String>,
    pub button: AddButton,
    pub quantity: u32,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub key: OptionKey,
    pub name: String,
    pub values: Vec<String>,
    pub selected: Option<String>,
}

#[derive(Debug, Default)]
pub(super) struct PopupState {
    product: Option<Product>,
    selected: SelectedOptions,
    quantity: Quantity,
    error: Option<String>,
}

impl PopupState {
    /// Fresh state for a newly loaded product. Slots with a single offered
    /// value are preselected.
    pub(super) fn opened(product: Product) -> Self {
        let mut selected = SelectedOptions::new();
        for key in option_keys(&product) {
            if let [only] = option_values(&product, key).as_slice() {
                selected.select(key, *only);
            }
        }
        Self {
            product: Some(product),
            selected,
            quantity: Quantity::default(),
            error: None,
        }
    }

    pub(super) fn is_open(&self) -> bool {
        self.product.is_some()
    }

    pub(super) fn selected(&self) -> &SelectedOptions {
        &self.selected
    }

    pub(super) fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub(super) fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub(super) fn select(&mut self, key: OptionKey, value: &str) -> Result<(), StorefrontError> {
        if !self.is_open() {
            return Err(StorefrontError::NotOpen);
        }
        self.selected.select(key, value);
        self.refresh_error();
        Ok(())
    }

    pub(super) fn unselect(&mut self, key: OptionKey) -> Result<(), StorefrontError> {
        if !self.is_open() {
            return Err(StorefrontError::NotOpen);
        }
        self.selected.unselect(key);
        self.refresh_error();
        Ok(())
    }

    pub(super) fn set_quantity(&mut self, quantity: Quantity) -> Result<Quantity, StorefrontError> {
        if !self.is_open() {
            return Err(StorefrontError::NotOpen);
        }
        self.quantity = quantity;
        Ok(quantity)
    }

    pub(super) fn resolved(&self) -> Option<&Variant> {
        self.product
            .as_ref()
            .and_then(|product| match_variant(product, &self.selected).variant())
    }

    /// Validates the current selection for an add-to-cart request, recording
    /// the inline error when it cannot be submitted.
    pub(super) fn cart_request(
        &mut self,
    ) -> Result<(i64, Quantity, SelectedOptions), StorefrontError> {
        let Some(product) = self.product.as_ref() else {
            return Err(StorefrontError::NotOpen);
        };

        let Some(variant) = match_variant(product, &self.selected).variant() else {
            let message = first_missing_option(product, &self.selected).map_or_else(
                || COMBINATION_UNAVAILABLE.to_owned(),
                |name| format!("Please choose a {name}"),
            );
            self.error = Some(message);
            return Err(StorefrontError::NoVariantSelected);
        };

        if !variant.available {
            let variant_id = variant.id;
            self.error = Some(VARIANT_SOLD_OUT.to_owned());
            return Err(StorefrontError::VariantUnavailable { variant_id });
        }

        let request = (variant.id, self.quantity, self.selected.clone());
        self.error = None;
        Ok(request)
    }

    pub(super) fn view(&self) -> Option<PopupView> {
        let product = self.product.as_ref()?;
        let resolved = self.resolved();

        let options = option_keys(product)
            .into_iter()
            .map(|key| OptionView {
                key,
                name: product.option_name(key).to_owned(),
                values: option_values(product, key)
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
                selected: self.selected.get(key).map(str::to_owned),
            })
            .collect();

        Some(PopupView {
            product_id: product.id,
            handle: product.handle.clone(),
            title: product.title.clone(),
            description: product.description.clone(),
            featured_image: product.featured_image.clone(),
            options,
            variant_id: resolved.map(|v| v.id),
            price: resolved.map(PriceDisplay::for_variant),
            stock: resolved.map(stock_label),
            button: AddButton::for_variant(resolved),
            quantity: self.quantity.get(),
            error: self.error.clone(),
        })
    }

    fn refresh_error(&mut self) {
        let Some(product) = self.product.as_ref() else {
            self.error = None;
            return;
        };
        let unmatched = match_variant(product, &self.selected).variant().is_none();
        self.error = (unmatched && is_complete(&self.selected, product))
            .then(|| COMBINATION_UNAVAILABLE.to_owned());
    }
}

fn first_missing_option(product: &Product, selected: &SelectedOptions) -> Option<String> {
    option_keys(product)
        .into_iter()
        .find(|key| !selected.contains(*key))
        .map(|key| product.option_name(key).to_lowercase())
}

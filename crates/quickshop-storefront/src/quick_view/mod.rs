//! Headless quick-view controller.
//!
//! Owns the state of the product popup (loaded product, option selections,
//! quantity, inline error) and runs the add-to-cart sequence:
//! cart add, then the promotion rule, then a cart count refresh, then events.
//! All network calls are sequential. A busy flag rejects a second load or
//! submit while one is in flight.

mod events;
mod state;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use quickshop_core::{OptionKey, PromotionOutcome, PromotionRule, Quantity, SelectedOptions};
use serde::Serialize;
use tokio::sync::broadcast;

use crate::error::StorefrontError;
use crate::resolver::ProductResolver;
use crate::types::CartLineItem;

pub use events::{Notice, NoticeLevel, StorefrontEvent};
pub use state::{OptionView, PopupView};

use state::PopupState;

const EVENT_CAPACITY: usize = 32;
const LOAD_FAILED: &str = "Could not load this product. Please try again.";
const ADD_FAILED: &str = "Could not add to cart. Please try again.";
const ADDED: &str = "Added to cart";

/// Result of a successful primary add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddOutcome {
    pub line: CartLineItem,
    pub promotion: PromotionOutcome,
    /// Cart item count after the add; `None` if the refresh failed.
    pub item_count: Option<u32>,
}

pub struct QuickView {
    resolver: ProductResolver,
    promotion: Option<PromotionRule>,
    state: Mutex<PopupState>,
    busy: AtomicBool,
    events: broadcast::Sender<StorefrontEvent>,
}

/// Clears the busy flag when dropped.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, StorefrontError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| StorefrontError::Busy)?;
        Ok(Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl QuickView {
    #[must_use]
    pub fn new(resolver: ProductResolver, promotion: Option<PromotionRule>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            resolver,
            promotion,
            state: Mutex::new(PopupState::default()),
            busy: AtomicBool::new(false),
            events,
        }
    }

    /// Subscribes to cart-updated events and notices.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StorefrontEvent> {
        self.events.subscribe()
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Loads `product_ref` and replaces the popup state with it.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::Busy`] if a load or submit is already running.
    /// - Any resolver error. The previous product is discarded and an error
    ///   notice is published.
    pub async fn open(&self, product_ref: &str) -> Result<PopupView, StorefrontError> {
        let _busy = BusyGuard::acquire(&self.busy)?;

        let product = match self.resolver.resolve(product_ref).await {
            Ok(product) => product,
            Err(e) => {
                tracing::warn!(product_ref, error = %e, "quick view load failed");
                *self.lock_state() = PopupState::default();
                self.publish(StorefrontEvent::Notice(Notice::error(LOAD_FAILED)));
                return Err(e);
            }
        };

        tracing::info!(
            product_ref,
            product_id = product.id,
            variants = product.variants.len(),
            purchasable = product.has_available_variants(),
            "quick view opened"
        );

        let mut state = self.lock_state();
        *state = PopupState::opened(product);
        state.view().ok_or(StorefrontError::NotOpen)
    }

    /// Discards the product and resets selections, quantity and error.
    pub fn close(&self) {
        *self.lock_state() = PopupState::default();
    }

    /// Current popup contents, or `None` when closed.
    #[must_use]
    pub fn view(&self) -> Option<PopupView> {
        self.lock_state().view()
    }

    #[must_use]
    pub fn selected_options(&self) -> SelectedOptions {
        self.lock_state().selected().clone()
    }

    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.lock_state().quantity()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.lock_state().error().map(str::to_owned)
    }

    /// Sets an option value; a blank value clears the slot.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotOpen`] when no product is loaded.
    pub fn select_option(&self, key: OptionKey, value: &str) -> Result<PopupView, StorefrontError> {
        let mut state = self.lock_state();
        state.select(key, value)?;
        state.view().ok_or(StorefrontError::NotOpen)
    }

    /// Clears an option slot.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotOpen`] when no product is loaded.
    pub fn clear_option(&self, key: OptionKey) -> Result<PopupView, StorefrontError> {
        let mut state = self.lock_state();
        state.unselect(key)?;
        state.view().ok_or(StorefrontError::NotOpen)
    }

    /// # Errors
    ///
    /// Returns [`StorefrontError::NotOpen`] when no product is loaded.
    pub fn increment_quantity(&self) -> Result<Quantity, StorefrontError> {
        let mut state = self.lock_state();
        let next = state.quantity().increment();
        state.set_quantity(next)
    }

    /// # Errors
    ///
    /// Returns [`StorefrontError::NotOpen`] when no product is loaded.
    pub fn decrement_quantity(&self) -> Result<Quantity, StorefrontError> {
        let mut state = self.lock_state();
        let next = state.quantity().decrement();
        state.set_quantity(next)
    }

    /// Sets the quantity, clamped to the allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::NotOpen`] when no product is loaded.
    pub fn set_quantity(&self, value: u32) -> Result<Quantity, StorefrontError> {
        self.lock_state().set_quantity(Quantity::new(value))
    }

    /// Adds the resolved variant to the cart.
    ///
    /// Nothing is sent unless the selection resolves to an available variant.
    /// After a successful add the promotion rule runs (its failures are only
    /// logged), the cart count is refreshed, and a
    /// [`StorefrontEvent::CartUpdated`] event is published.
    ///
    /// # Errors
    ///
    /// - [`StorefrontError::Busy`] if a load or submit is already running.
    /// - [`StorefrontError::NotOpen`], [`StorefrontError::NoVariantSelected`],
    ///   [`StorefrontError::VariantUnavailable`] before any request is made.
    /// - Any error from the primary cart add; an error notice is published.
    pub async fn submit(&self) -> Result<AddOutcome, StorefrontError> {
        let _busy = BusyGuard::acquire(&self.busy)?;

        let (variant_id, quantity, selected) = self.lock_state().cart_request()?;

        let client = self.resolver.client();
        let line = match client.add_to_cart(variant_id, quantity).await {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(variant_id, error = %e, "add to cart failed");
                self.publish(StorefrontEvent::Notice(Notice::error(ADD_FAILED)));
                return Err(e);
            }
        };

        let promotion = match &self.promotion {
            Some(rule) if rule.applies(&selected) => self.add_promotion(rule).await,
            _ => PromotionOutcome::NotApplicable,
        };

        let item_count = match client.fetch_cart().await {
            Ok(cart) => Some(cart.item_count),
            Err(e) => {
                tracing::warn!(error = %e, "cart count refresh failed");
                None
            }
        };

        self.publish(StorefrontEvent::CartUpdated { item_count });
        self.publish(StorefrontEvent::Notice(Notice::success(ADDED)));

        Ok(AddOutcome {
            line,
            promotion,
            item_count,
        })
    }

    /// Best-effort add of the promotion product's first variant.
    async fn add_promotion(&self, rule: &PromotionRule) -> PromotionOutcome {
        let client = self.resolver.client();
        let product_ref = rule.product_ref();

        let product = match client.fetch_product(product_ref).await {
            Ok(product) => product,
            Err(e) => {
                tracing::warn!(product_ref, error = %e, "promotion product fetch failed");
                return PromotionOutcome::Failed;
            }
        };

        let Some(variant_id) = product.first_variant().map(|v| v.id) else {
            tracing::warn!(product_ref, "promotion product has no variants");
            return PromotionOutcome::Failed;
        };

        match client.add_to_cart(variant_id, Quantity::default()).await {
            Ok(_) => {
                tracing::info!(product_ref, variant_id, "promotion product added");
                PromotionOutcome::Added { variant_id }
            }
            Err(e) => {
                tracing::warn!(product_ref, variant_id, error = %e, "promotion add failed");
                PromotionOutcome::Failed
            }
        }
    }

    fn publish(&self, event: StorefrontEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("no quick view subscribers");
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, PopupState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

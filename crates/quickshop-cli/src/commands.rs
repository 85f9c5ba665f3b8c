//! Command handlers for the CLI.
//!
//! Each handler builds its own client from the loaded config, drives the
//! quick view the way the storefront popup would, and prints the result.
//! Notices published by the quick view go to stderr.

use quickshop_core::{format_money, AppConfig, OptionKey, PromotionOutcome};
use quickshop_storefront::{
    AddOutcome, Cart, EmbeddedProducts, NoticeLevel, PopupView, ProductResolver, QuickView,
    StorefrontClient, StorefrontEvent,
};
use tokio::sync::broadcast;

use crate::{SelectionArgs, SourceArgs};

impl SelectionArgs {
    pub(crate) fn pairs(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        OptionKey::ALL
            .into_iter()
            .zip([&self.option1, &self.option2, &self.option3])
            .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
    }
}

/// One-line description of the configured promotion rule for the startup log.
pub(crate) fn promotion_summary(config: &AppConfig) -> String {
    match config.promotion_rule() {
        Some(rule) => format!(
            "promotion enabled: {} + {} adds {}",
            rule.first_value(),
            rule.second_value(),
            rule.product_ref()
        ),
        None => "promotion disabled: QUICKSHOP_PROMO_PRODUCT is not set".to_string(),
    }
}

fn build_client(config: &AppConfig) -> anyhow::Result<StorefrontClient> {
    StorefrontClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build storefront client: {e}"))
}

fn load_embedded(source: &SourceArgs) -> anyhow::Result<EmbeddedProducts> {
    let Some(path) = source.page.as_deref() else {
        return Ok(EmbeddedProducts::new());
    };
    let html = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read page {}: {e}", path.display()))?;
    let embedded = EmbeddedProducts::from_html(&html);
    tracing::debug!(
        page = %path.display(),
        products = embedded.len(),
        "loaded embedded product data"
    );
    Ok(embedded)
}

fn build_quick_view(config: &AppConfig, source: &SourceArgs) -> anyhow::Result<QuickView> {
    let resolver = ProductResolver::new(build_client(config)?, load_embedded(source)?);
    Ok(QuickView::new(resolver, config.promotion_rule()))
}

/// Opens `product`, applies the selection, and returns the resulting view.
async fn open_with_selection(
    quick_view: &QuickView,
    product: &str,
    selection: &SelectionArgs,
) -> anyhow::Result<PopupView> {
    let mut view = quick_view.open(product).await?;
    for (key, value) in selection.pairs() {
        view = quick_view.select_option(key, value)?;
    }
    Ok(view)
}

/// Prints the popup for `product` after applying any selection.
///
/// # Errors
///
/// Returns an error if the client cannot be built, the page cannot be read,
/// or the product cannot be loaded.
pub(crate) async fn run_show(
    config: &AppConfig,
    product: &str,
    selection: &SelectionArgs,
    source: &SourceArgs,
) -> anyhow::Result<()> {
    let quick_view = build_quick_view(config, source)?;
    let mut events = quick_view.subscribe();

    let result = open_with_selection(&quick_view, product, selection).await;
    drain_notices(&mut events);
    let view = result?;

    if source.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render_view(&view));
    }
    Ok(())
}

/// Selects options and submits the add-to-cart sequence.
///
/// # Errors
///
/// Returns an error if the product cannot be loaded, the selection does not
/// resolve to an available variant, or the cart rejects the add. A failed
/// promotion add is reported in the outcome, not as an error.
pub(crate) async fn run_add(
    config: &AppConfig,
    product: &str,
    selection: &SelectionArgs,
    quantity: u32,
    source: &SourceArgs,
) -> anyhow::Result<()> {
    let quick_view = build_quick_view(config, source)?;
    let mut events = quick_view.subscribe();

    if let Err(e) = open_with_selection(&quick_view, product, selection).await {
        drain_notices(&mut events);
        return Err(e);
    }
    let quantity = quick_view.set_quantity(quantity)?;

    let outcome = match quick_view.submit().await {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(message) = quick_view.error() {
                eprintln!("{message}");
            }
            drain_notices(&mut events);
            return Err(e.into());
        }
    };
    drain_notices(&mut events);

    tracing::debug!(quantity = quantity.get(), "submitted quick view add");

    if source.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", render_outcome(&outcome));
    }
    Ok(())
}

/// Prints the current cart.
///
/// # Errors
///
/// Returns an error if the client cannot be built or the cart cannot be read.
pub(crate) async fn run_cart(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let cart = build_client(config)?.fetch_cart().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&cart)?);
    } else {
        println!("{}", render_cart(&cart));
    }
    Ok(())
}

fn drain_notices(events: &mut broadcast::Receiver<StorefrontEvent>) {
    while let Ok(event) = events.try_recv() {
        if let StorefrontEvent::Notice(notice) = event {
            match notice.level {
                NoticeLevel::Success => eprintln!("{}", notice.message),
                NoticeLevel::Error => eprintln!("error: {}", notice.message),
            }
        }
    }
}

pub(crate) fn render_view(view: &PopupView) -> String {
    let mut lines = vec![format!("{} ({})", view.title, view.handle)];

    for option in &view.options {
        let values = option
            .values
            .iter()
            .map(|value| {
                if option.selected.as_deref() == Some(value.as_str()) {
                    format!("[{value}]")
                } else {
                    value.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(format!("  {}: {values}", option.name));
    }

    if let Some(price) = &view.price {
        match &price.compare_at {
            Some(compare_at) => lines.push(format!("  price: {} (was {compare_at})", price.price)),
            None => lines.push(format!("  price: {}", price.price)),
        }
    }
    if let Some(stock) = &view.stock {
        lines.push(format!("  {stock}"));
    }
    lines.push(format!("  quantity: {}  {}", view.quantity, view.button));
    if let Some(error) = &view.error {
        lines.push(format!("  {error}"));
    }

    lines.join("\n")
}

pub(crate) fn render_outcome(outcome: &AddOutcome) -> String {
    let line = &outcome.line;
    let mut lines = vec![format!(
        "added {} x {} (variant {})",
        line.quantity,
        line.title,
        line.variant_id.unwrap_or(line.id)
    )];

    match outcome.promotion {
        PromotionOutcome::Added { variant_id } => {
            lines.push(format!("promotion: added variant {variant_id}"));
        }
        PromotionOutcome::Failed => {
            lines.push("promotion: could not be added".to_string());
        }
        PromotionOutcome::NotApplicable => {}
    }

    match outcome.item_count {
        Some(count) => lines.push(format!("cart: {count} items")),
        None => lines.push("cart: item count unavailable".to_string()),
    }

    lines.join("\n")
}

pub(crate) fn render_cart(cart: &Cart) -> String {
    let mut lines = vec![format!(
        "{} items, total {}",
        cart.item_count,
        format_money(cart.total_price)
    )];
    for item in &cart.items {
        let line_price = item
            .line_price
            .unwrap_or_else(|| item.price.saturating_mul(i64::from(item.quantity)));
        lines.push(format!(
            "  {} x {}  {}",
            item.quantity,
            item.title,
            format_money(line_price)
        ));
    }
    lines.join("\n")
}

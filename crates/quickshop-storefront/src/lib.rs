pub mod client;
pub mod embedded;
pub mod error;
pub mod normalize;
pub mod quick_view;
pub mod resolver;
pub mod types;

pub use client::StorefrontClient;
pub use embedded::EmbeddedProducts;
pub use error::StorefrontError;
pub use normalize::normalize_product;
pub use quick_view::{
    AddOutcome, Notice, NoticeLevel, OptionView, PopupView, QuickView, StorefrontEvent,
};
pub use resolver::ProductResolver;
pub use types::{Cart, CartLineItem, ProductJs, VariantJs};

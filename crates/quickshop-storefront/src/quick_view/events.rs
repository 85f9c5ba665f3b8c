use serde::Serialize;

/// Events published by the quick view for other components (cart badge,
/// toast area).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StorefrontEvent {
    /// The cart changed. `item_count` is `None` when the count refresh failed.
    CartUpdated { item_count: Option<u32> },
    /// A transient message for the shopper.
    Notice(Notice),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: &str) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.to_owned(),
        }
    }

    #[must_use]
    pub fn error(message: &str) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.to_owned(),
        }
    }
}

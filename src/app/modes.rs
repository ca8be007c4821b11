//! View phase and notification types.
//!
//! A list view is always in exactly one [`ViewPhase`]:
//!
//! ```text
//! Idle ──load──▶ Loading ──ok──▶ Loaded
//!                   │  ▲            │
//!                 fail └── change ──┤
//!                   ▼               │
//!                 Error ── change ──┘
//! ```
//!
//! A new load while one is in flight stays in `Loading`; only the response
//! to the latest load moves the view on.

/// Lifecycle phase of a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewPhase {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// The latest load succeeded.
    Loaded,
    /// The latest load failed.
    Error,
}

impl ViewPhase {
    #[must_use]
    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Transient message shown after a row action or a blocked submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

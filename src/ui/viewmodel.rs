//! View model types for a list view.
//!
//! View models are plain data computed from list state by
//! [`render`](super::render) and consumed by the painter. They carry no
//! behaviour beyond what is needed to draw them: cell text, highlight ranges,
//! pager links with their enabled flags, and an explicit body variant for
//! each of loading, rows, empty and error.

use crate::app::modes::Notification;
use crate::domain::LoadErrorKind;

/// Everything needed to draw one list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    /// Discrete filters with their current value (`all` when unset).
    pub filters: Vec<FilterInfo>,
    pub columns: Vec<ColumnInfo>,
    pub body: ListBody,
    /// Absent when there is at most one page.
    pub pager: Option<PagerInfo>,
    pub footer: FooterInfo,
    pub notification: Option<Notification>,
    /// Pending confirmation question, if any.
    pub confirmation: Option<String>,
    pub form: Option<FormInfo>,
}

/// Title bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// Listing label.
    pub title: String,
    /// Total item count; only set for a successful load.
    pub count: Option<u64>,
    /// Sort description, e.g. `createdAt desc`.
    pub sort: String,
}

/// Search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    /// Text as typed.
    pub query: String,
    /// `true` while typed text has not been applied yet.
    pub pending: bool,
}

/// A discrete filter and its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterInfo {
    pub key: String,
    pub value: String,
}

/// A table column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub header: String,
    pub width: usize,
}

/// Main content area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListBody {
    /// No result for the current parameters yet.
    Loading,
    /// At least one row.
    Rows(Vec<DisplayRow>),
    /// The load succeeded with no items.
    Empty(EmptyState),
    /// The load failed.
    Error(ErrorState),
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    /// Record id, used as the target of row actions.
    pub id: String,
    /// Cell text, one per column.
    pub cells: Vec<String>,
    /// Character ranges of the first cell matching the search, `(start, end)`.
    pub highlight_ranges: Vec<(usize, usize)>,
    /// Wishlist state; `None` for listings without a wishlist.
    pub is_wishlisted: Option<bool>,
}

/// "No results" block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Load failure block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorState {
    pub kind: LoadErrorKind,
    pub title: String,
    pub message: String,
}

/// Pager controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerInfo {
    pub previous: PagerLink,
    pub next: PagerLink,
    /// Page links around the current page.
    pub pages: Vec<PageLink>,
}

/// Previous or next link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerLink {
    /// Page the link navigates to.
    pub target: u32,
    pub enabled: bool,
}

/// Numbered page link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    pub page: u32,
    pub is_current: bool,
}

/// Edit form overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInfo {
    pub title: String,
    /// Field name and current value, in column order.
    pub fields: Vec<(String, String)>,
    /// Fields that must be filled before saving.
    pub required: Vec<String>,
}

/// Bottom line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Range summary such as `Showing 21-40 of 45`; empty when nothing is shown.
    pub summary: String,
}

//! Filter state store.
//!
//! [`FilterState`] holds the listing parameters of one view: page, page
//! size, sort, free-text search and the listing's discrete filters.
//! [`FilterStore`] is the only way to mutate it and enforces its invariants:
//!
//! - `page >= 1`
//! - any accepted change other than `page` resets `page` to 1
//! - `page_size` is always one of [`PAGE_SIZES`]
//! - sort order is always `asc` or `desc`, sort field is one the listing
//!   declares
//! - unknown values are ignored silently and the previous value is kept
//!
//! The sentinel [`FilterValue::All`] never reaches the Data API; see
//! [`FilterState::to_query`].
//!
//! # Example
//!
//! ```
//! use wud_console::app::filter::{FilterChange, FilterStore};
//! use wud_console::domain::ResourceKind;
//!
//! let mut store = FilterStore::new(ResourceKind::Products, 20);
//! store.apply(FilterChange::page(3));
//! let state = store.apply(FilterChange::default().filter("status", "draft"));
//! assert_eq!(state.page, 1);
//! ```

use crate::domain::ResourceKind;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Allowed page sizes.
pub const PAGE_SIZES: [u32; 3] = [10, 20, 50];

/// Page size used when the configured one is not allowed.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Literal used by selectors for "no constraint".
pub const ALL_SENTINEL: &str = "all";

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(format!("unknown sort order '{other}'")),
        }
    }
}

/// Value of a discrete filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Unfiltered.
    All,
    /// Concrete value forwarded to the Data API.
    Value(String),
}

impl FilterValue {
    /// Parses a selector value; `all` (any case) and blank map to [`FilterValue::All`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SENTINEL) {
            Self::All
        } else {
            Self::Value(trimmed.to_string())
        }
    }

    /// Returns the concrete value, if any.
    #[must_use]
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Value(v) => Some(v),
        }
    }
}

/// Immutable snapshot of a view's listing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Listing the parameters belong to.
    pub resource: ResourceKind,
    /// Current 1-indexed page.
    pub page: u32,
    /// Items per page, one of [`PAGE_SIZES`].
    pub page_size: u32,
    /// Sort field, one of the listing's sort fields.
    pub sort_by: String,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// Free-text search; empty means no search.
    pub search: String,
    /// Discrete filters keyed by query parameter name.
    pub filters: BTreeMap<String, FilterValue>,
}

impl FilterState {
    /// Default parameters for a listing.
    ///
    /// `page_size` falls back to [`DEFAULT_PAGE_SIZE`] when not allowed.
    #[must_use]
    pub fn new(resource: ResourceKind, page_size: u32) -> Self {
        let filters = resource
            .filters()
            .iter()
            .map(|spec| (spec.key.to_string(), FilterValue::All))
            .collect();

        Self {
            resource,
            page: 1,
            page_size: if PAGE_SIZES.contains(&page_size) {
                page_size
            } else {
                DEFAULT_PAGE_SIZE
            },
            sort_by: resource.default_sort().to_string(),
            sort_order: SortOrder::Desc,
            search: String::new(),
            filters,
        }
    }

    /// Returns `true` if a search or any discrete filter narrows the listing.
    #[must_use]
    pub fn is_narrowed(&self) -> bool {
        !self.search.trim().is_empty()
            || self.filters.values().any(|v| matches!(v, FilterValue::Value(_)))
    }

    /// Builds the outgoing query parameters.
    ///
    /// Always sends `page`, `pageSize`, `sortBy` and `sortOrder`; sends
    /// `search` only when non-blank and each discrete filter only when it
    /// holds a concrete value.
    #[must_use]
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
            ("sortBy".to_string(), self.sort_by.clone()),
            ("sortOrder".to_string(), self.sort_order.as_str().to_string()),
        ];

        let search = self.search.trim();
        if !search.is_empty() {
            query.push(("search".to_string(), search.to_string()));
        }

        query.extend(
            self.filters
                .iter()
                .filter_map(|(key, value)| value.as_value().map(|v| (key.clone(), v.to_string()))),
        );

        query
    }
}

/// Partial update to a [`FilterState`], expressed as raw control values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterChange {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub search: Option<String>,
    pub filters: Vec<(String, String)>,
}

impl FilterChange {
    /// Direct page navigation.
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: Some(text.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn page_size(size: u32) -> Self {
        Self {
            page_size: Some(size),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sort(field: impl Into<String>) -> Self {
        Self {
            sort_by: Some(field.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sort_order(order: impl Into<String>) -> Self {
        Self {
            sort_order: Some(order.into()),
            ..Self::default()
        }
    }

    /// Adds a discrete filter value to the change.
    #[must_use]
    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }
}

/// Owner of a view's [`FilterState`].
#[derive(Debug, Clone)]
pub struct FilterStore {
    state: FilterState,
}

impl FilterStore {
    /// Creates a store holding the default parameters of `resource`.
    ///
    /// # Example
    ///
    /// ```
    /// use wud_console::app::{FilterChange, FilterStore};
    /// use wud_console::domain::ResourceKind;
    ///
    /// let mut store = FilterStore::new(ResourceKind::Products, 20);
    /// assert_eq!(store.current().sort_by, "createdAt");
    ///
    /// store.apply(FilterChange::page(3));
    /// let state = store.apply(FilterChange::sort("price"));
    /// assert_eq!(state.page, 1);
    /// assert_eq!(state.sort_by, "price");
    /// ```
    #[must_use]
    pub fn new(resource: ResourceKind, page_size: u32) -> Self {
        Self {
            state: FilterState::new(resource, page_size),
        }
    }

    /// Returns a snapshot of the current parameters.
    #[must_use]
    pub fn get(&self) -> FilterState {
        self.state.clone()
    }

    /// Borrows the current parameters.
    #[must_use]
    pub const fn current(&self) -> &FilterState {
        &self.state
    }

    /// Merges a partial update and returns the new snapshot.
    ///
    /// Rejected fields are skipped individually. If any non-page field was
    /// accepted, `page` is reset to 1 and a `page` in the same change is
    /// ignored; otherwise `page` is set directly, clamped to `>= 1`.
    pub fn apply(&mut self, change: FilterChange) -> FilterState {
        let resource = self.state.resource;
        let mut next = self.state.clone();
        let mut resets_page = false;

        if let Some(size) = change.page_size {
            if PAGE_SIZES.contains(&size) {
                next.page_size = size;
                resets_page = true;
            } else {
                tracing::debug!(page_size = size, "ignoring page size outside presets");
            }
        }

        if let Some(field) = change.sort_by {
            if resource.sort_fields().contains(&field.as_str()) {
                next.sort_by = field;
                resets_page = true;
            } else {
                tracing::debug!(sort_by = %field, resource = %resource, "ignoring unknown sort field");
            }
        }

        if let Some(order) = change.sort_order {
            match order.parse::<SortOrder>() {
                Ok(order) => {
                    next.sort_order = order;
                    resets_page = true;
                }
                Err(e) => tracing::debug!(error = %e, "ignoring sort order"),
            }
        }

        if let Some(search) = change.search {
            next.search = search;
            resets_page = true;
        }

        for (key, raw) in change.filters {
            let Some(spec) = resource.filter(&key) else {
                tracing::debug!(filter = %key, resource = %resource, "ignoring unknown filter");
                continue;
            };
            let value = FilterValue::parse(&raw);
            let accepted = match &value {
                FilterValue::All => true,
                FilterValue::Value(v) => spec.accepts(v),
            };
            if accepted {
                next.filters.insert(key, value);
                resets_page = true;
            } else {
                tracing::debug!(filter = %key, value = %raw, "ignoring filter value outside allowed set");
            }
        }

        if resets_page {
            next.page = 1;
        } else if let Some(page) = change.page {
            next.page = page.max(1);
        }

        self.state = next;
        self.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults_omit_sentinel_filters() {
        let store = FilterStore::new(ResourceKind::Products, 20);
        assert_eq!(
            store.get().to_query(),
            pairs(&[
                ("page", "1"),
                ("pageSize", "20"),
                ("sortBy", "createdAt"),
                ("sortOrder", "desc"),
            ])
        );
    }

    #[test]
    fn concrete_filters_follow_search_in_key_order() {
        let mut store = FilterStore::new(ResourceKind::Products, 20);
        let state = store.apply(
            FilterChange::search("walnut")
                .filter("status", "published")
                .filter("category", "c1"),
        );
        assert_eq!(
            state.to_query(),
            pairs(&[
                ("page", "1"),
                ("pageSize", "20"),
                ("sortBy", "createdAt"),
                ("sortOrder", "desc"),
                ("search", "walnut"),
                ("category", "c1"),
                ("status", "published"),
            ])
        );
    }

    #[test]
    fn filter_change_resets_page() {
        let mut store = FilterStore::new(ResourceKind::Products, 20);
        assert_eq!(store.apply(FilterChange::page(3)).page, 3);

        let state = store.apply(FilterChange::default().filter("status", "draft"));
        assert_eq!(state.page, 1);
        assert_eq!(
            state.filters.get("status"),
            Some(&FilterValue::Value("draft".to_string()))
        );
    }

    #[test]
    fn page_is_clamped_to_one() {
        let mut store = FilterStore::new(ResourceKind::Orders, 20);
        assert_eq!(store.apply(FilterChange::page(0)).page, 1);
    }

    #[test]
    fn unknown_values_are_ignored_without_reset() {
        let mut store = FilterStore::new(ResourceKind::Orders, 20);
        store.apply(FilterChange::page(4));

        let state = store.apply(FilterChange::page_size(25));
        assert_eq!(state.page_size, 20);
        assert_eq!(state.page, 4);

        let state = store.apply(FilterChange::sort("colour"));
        assert_eq!(state.sort_by, "createdAt");

        let state = store.apply(FilterChange::sort_order("sideways"));
        assert_eq!(state.sort_order, SortOrder::Desc);

        let state = store.apply(FilterChange::default().filter("status", "teleported"));
        assert_eq!(state.filters.get("status"), Some(&FilterValue::All));

        let state = store.apply(FilterChange::default().filter("role", "admin"));
        assert!(!state.filters.contains_key("role"));
        assert_eq!(state.page, 4);
    }

    #[test]
    fn all_sentinel_is_never_forwarded() {
        let mut store = FilterStore::new(ResourceKind::Users, 10);
        store.apply(FilterChange::default().filter("role", "admin"));
        let state = store.apply(FilterChange::default().filter("role", "ALL"));

        assert_eq!(state.filters.get("role"), Some(&FilterValue::All));
        assert!(state.to_query().iter().all(|(k, _)| k != "role"));
    }

    #[test]
    fn search_is_trimmed_and_sent_when_present() {
        let mut store = FilterStore::new(ResourceKind::BlogPosts, 50);
        let state = store.apply(FilterChange::search("  oak care "));
        assert_eq!(state.to_query().last(), Some(&("search".to_string(), "oak care".to_string())));
        assert!(state.is_narrowed());

        let state = store.apply(FilterChange::search("   "));
        assert!(state.to_query().iter().all(|(k, _)| k != "search"));
        assert!(!state.is_narrowed());
    }

    #[test]
    fn invalid_configured_page_size_falls_back() {
        let state = FilterState::new(ResourceKind::Categories, 30);
        assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
        assert!(state.filters.is_empty());
    }

    #[test]
    fn mixed_change_applies_valid_parts() {
        let mut store = FilterStore::new(ResourceKind::Products, 20);
        let state = store.apply(FilterChange {
            page: Some(5),
            page_size: Some(50),
            sort_by: Some("price".into()),
            sort_order: Some("asc".into()),
            search: None,
            filters: vec![("status".into(), "bogus".into()), ("category".into(), "c9".into())],
        });

        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, 50);
        assert_eq!(state.sort_by, "price");
        assert_eq!(state.sort_order, SortOrder::Asc);
        assert_eq!(state.filters.get("status"), Some(&FilterValue::All));
        assert_eq!(
            state.filters.get("category"),
            Some(&FilterValue::Value("c9".to_string()))
        );
    }

    proptest! {
        #[test]
        fn any_non_page_change_resets_page(
            start in 2u32..500,
            status in prop::sample::select(vec!["all", "draft", "published", "archived"]),
            size in prop::sample::select(PAGE_SIZES.to_vec()),
            search in "[a-z ]{0,12}",
            which in 0usize..3,
        ) {
            let mut store = FilterStore::new(ResourceKind::Products, 20);
            store.apply(FilterChange::page(start));
            let change = match which {
                0 => FilterChange::default().filter("status", status),
                1 => FilterChange::page_size(size),
                _ => FilterChange::search(search),
            };
            prop_assert_eq!(store.apply(change).page, 1);
        }

        #[test]
        fn page_navigation_never_goes_below_one(page in 0u32..10_000) {
            let mut store = FilterStore::new(ResourceKind::Catalog, 10);
            let state = store.apply(FilterChange::page(page));
            prop_assert!(state.page >= 1);
            prop_assert_eq!(state.page, page.max(1));
        }

        #[test]
        fn page_size_always_a_preset(size in 0u32..200) {
            let mut store = FilterStore::new(ResourceKind::Orders, 20);
            let state = store.apply(FilterChange::page_size(size));
            prop_assert!(PAGE_SIZES.contains(&state.page_size));
        }
    }
}

//! Pure list renderer and the painting entry point.
//!
//! Rendering happens in two steps:
//!
//! 1. [`render`] maps a filter snapshot and the latest load outcome to a
//!    [`ListViewModel`]. It reads no clock and no global state, so the same
//!    input always yields the same view model.
//! 2. [`paint`] turns a view model into themed text.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use wud_console::app::filter::FilterState;
//! use wud_console::app::loader::PageResult;
//! use wud_console::domain::ResourceKind;
//! use wud_console::ui::{render, ListBody};
//!
//! let filter = FilterState::new(ResourceKind::Orders, 20);
//! let outcome = Ok(PageResult { items: vec![], page: 1, pages: 1, count: 0 });
//! let vm = render(&filter, Some(&outcome), &HashMap::new());
//! assert!(matches!(vm.body, ListBody::Empty(_)));
//! assert!(vm.pager.is_none());
//! ```

use crate::app::filter::FilterState;
use crate::app::loader::PageResult;
use crate::domain::{LoadError, LoadErrorKind, Record, ResourceKind};
use crate::ui::components;
use crate::ui::helpers::{highlight_ranges, Painter};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ColumnInfo, DisplayRow, EmptyState, ErrorState, FilterInfo, FooterInfo, HeaderInfo, ListBody,
    ListViewModel, PageLink, PagerInfo, PagerLink, SearchBarInfo,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::HashMap;

/// Page links shown on each side of the current page.
const PAGER_RADIUS: u32 = 2;

/// Builds the view model for one list view.
///
/// - `outcome` is `None` while no result for the current parameters exists.
/// - `wishlist` holds optimistic per-record overrides; records without an
///   entry use their server-side flag.
///
/// Chrome that belongs to the interactive view (notification, form,
/// confirmation) is left empty.
#[must_use]
pub fn render(
    filter: &FilterState,
    outcome: Option<&Result<PageResult, LoadError>>,
    wishlist: &HashMap<String, bool>,
) -> ListViewModel {
    let resource = filter.resource;
    let _span = tracing::debug_span!("render", resource = %resource, has_outcome = outcome.is_some()).entered();

    let (body, count, pager, summary) = match outcome {
        None => (ListBody::Loading, None, None, String::new()),
        Some(Err(error)) => (ListBody::Error(error_state(resource, error)), None, None, String::new()),
        Some(Ok(result)) if result.items.is_empty() => (
            ListBody::Empty(empty_state(filter)),
            Some(result.count),
            pager(result.page, result.pages),
            String::new(),
        ),
        Some(Ok(result)) => (
            ListBody::Rows(display_rows(filter, result, wishlist)),
            Some(result.count),
            pager(result.page, result.pages),
            range_summary(result, filter.page_size),
        ),
    };

    ListViewModel {
        header: HeaderInfo {
            title: resource.label().to_string(),
            count,
            sort: format!("{} {}", filter.sort_by, filter.sort_order),
        },
        search_bar: SearchBarInfo {
            query: filter.search.clone(),
            pending: false,
        },
        filters: filter
            .filters
            .iter()
            .map(|(key, value)| FilterInfo {
                key: key.clone(),
                value: value.as_value().unwrap_or("all").to_string(),
            })
            .collect(),
        columns: resource
            .columns()
            .iter()
            .map(|c| ColumnInfo {
                header: c.header.to_string(),
                width: c.width,
            })
            .collect(),
        body,
        pager,
        footer: FooterInfo { summary },
        notification: None,
        confirmation: None,
        form: None,
    }
}

/// Pager controls for `page` of `pages`, or `None` when there is at most one
/// page.
///
/// Links cover `max(1, p-2)..=min(pages, p+2)` around the current page `p`,
/// which is clamped into `[1, pages]`.
#[must_use]
pub fn pager(page: u32, pages: u32) -> Option<PagerInfo> {
    if pages <= 1 {
        return None;
    }

    let current = page.clamp(1, pages);
    let first = current.saturating_sub(PAGER_RADIUS).max(1);
    let last = current.saturating_add(PAGER_RADIUS).min(pages);

    Some(PagerInfo {
        previous: PagerLink {
            target: current.saturating_sub(1).max(1),
            enabled: current > 1,
        },
        next: PagerLink {
            target: current.saturating_add(1).min(pages),
            enabled: current < pages,
        },
        pages: (first..=last)
            .map(|p| PageLink {
                page: p,
                is_current: p == current,
            })
            .collect(),
    })
}

/// Returns a record's wishlist state, preferring an optimistic override.
#[must_use]
pub fn wishlist_state(record: &Record, overrides: &HashMap<String, bool>) -> bool {
    overrides
        .get(&record.id)
        .copied()
        .unwrap_or_else(|| record.is_wishlisted())
}

fn display_rows(
    filter: &FilterState,
    result: &PageResult,
    wishlist: &HashMap<String, bool>,
) -> Vec<DisplayRow> {
    let resource = filter.resource;
    let matcher = SkimMatcherV2::default();

    result
        .items
        .iter()
        .map(|record| {
            let cells: Vec<String> = resource
                .columns()
                .iter()
                .map(|column| record.display(column.field))
                .collect();
            let highlight_ranges = cells
                .first()
                .map(|title| highlight_ranges(&matcher, title, &filter.search))
                .unwrap_or_default();

            DisplayRow {
                id: record.id.clone(),
                cells,
                highlight_ranges,
                is_wishlisted: resource
                    .has_wishlist()
                    .then(|| wishlist_state(record, wishlist)),
            }
        })
        .collect()
}

fn empty_state(filter: &FilterState) -> EmptyState {
    let label = filter.resource.label().to_lowercase();
    if filter.is_narrowed() {
        EmptyState {
            message: format!("No {label} match the current filters"),
            subtitle: "Clear the search or set filters back to all".to_string(),
        }
    } else {
        EmptyState {
            message: format!("No {label} yet"),
            subtitle: String::new(),
        }
    }
}

fn error_state(resource: ResourceKind, error: &LoadError) -> ErrorState {
    let title = match (error.kind, error.source.status()) {
        (LoadErrorKind::NetworkFailure, _) => "Could not reach the server".to_string(),
        (LoadErrorKind::Unauthorized, _) => "Your session has expired".to_string(),
        (LoadErrorKind::ServerError, Some(404)) => format!("{} not found", resource.label()),
        (LoadErrorKind::ServerError, _) => {
            format!("Failed to load {}", resource.label().to_lowercase())
        }
    };

    ErrorState {
        kind: error.kind,
        title,
        message: error.source.user_message(),
    }
}

fn range_summary(result: &PageResult, page_size: u32) -> String {
    let start = u64::from(result.page.saturating_sub(1)) * u64::from(page_size) + 1;
    let end = start + result.items.len() as u64 - 1;
    format!("Showing {start}-{end} of {}", result.count.max(end))
}

/// Paints a view model as text `cols` columns wide.
///
/// With `color` off the output carries no escape sequences.
#[must_use]
pub fn paint(vm: &ListViewModel, theme: &Theme, color: bool, cols: usize) -> String {
    let painter = Painter::new(theme, color);
    components::render_list(vm, &painter, cols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::filter::{FilterChange, FilterStore};
    use crate::domain::ApiError;
    use proptest::prelude::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        Record::from_value(value).unwrap()
    }

    fn page(items: Vec<Record>, page: u32, pages: u32, count: u64) -> Result<PageResult, LoadError> {
        Ok(PageResult {
            items,
            page,
            pages,
            count,
        })
    }

    fn products() -> Vec<Record> {
        vec![
            record(json!({ "_id": "p1", "name": "Walnut desk", "price": 890, "stock": 3,
                "status": "published", "createdAt": "2024-03-05T10:00:00Z" })),
            record(json!({ "_id": "p2", "name": "Oak stool", "price": 120, "stock": 0,
                "status": "draft", "createdAt": "2024-02-01T08:30:00+02:00" })),
        ]
    }

    #[test]
    fn rows_carry_cells_and_count() {
        let filter = FilterState::new(ResourceKind::Products, 20);
        let outcome = page(products(), 1, 1, 2);
        let vm = render(&filter, Some(&outcome), &HashMap::new());

        assert_eq!(vm.header.count, Some(2));
        assert!(vm.pager.is_none());
        let ListBody::Rows(rows) = &vm.body else {
            panic!("expected rows, got {:?}", vm.body);
        };
        assert_eq!(rows[0].cells, vec!["Walnut desk", "890", "3", "published", "2024-03-05"]);
        assert_eq!(rows[1].cells[4], "2024-02-01");
        assert_eq!(rows[0].is_wishlisted, None);
        assert_eq!(vm.footer.summary, "Showing 1-2 of 2");
    }

    #[test]
    fn empty_and_error_are_distinct() {
        let filter = FilterState::new(ResourceKind::Orders, 20);

        let empty = render(&filter, Some(&page(vec![], 1, 1, 0)), &HashMap::new());
        assert_eq!(
            empty.body,
            ListBody::Empty(EmptyState {
                message: "No orders yet".into(),
                subtitle: String::new(),
            })
        );

        let not_found = Err(LoadError::from(ApiError::Status {
            status: 404,
            message: "Not Found".into(),
            data: json!({}),
        }));
        let failed = render(&filter, Some(&not_found), &HashMap::new());
        assert_eq!(failed.header.count, None);
        match failed.body {
            ListBody::Error(error) => {
                assert_eq!(error.kind, LoadErrorKind::ServerError);
                assert_eq!(error.title, "Orders not found");
                assert_eq!(error.message, "Not Found");
            }
            other => panic!("expected error block, got {other:?}"),
        }
    }

    #[test]
    fn narrowed_empty_state_mentions_filters() {
        let mut store = FilterStore::new(ResourceKind::Users, 20);
        let filter = store.apply(FilterChange::default().filter("role", "admin"));
        let vm = render(&filter, Some(&page(vec![], 1, 1, 0)), &HashMap::new());
        let ListBody::Empty(empty) = vm.body else {
            panic!("expected empty state");
        };
        assert_eq!(empty.message, "No users match the current filters");
    }

    #[test]
    fn pending_outcome_renders_loading() {
        let filter = FilterState::new(ResourceKind::BlogPosts, 10);
        let vm = render(&filter, None, &HashMap::new());
        assert_eq!(vm.body, ListBody::Loading);
        assert_eq!(vm.header.count, None);
        assert_eq!(vm.filters, vec![FilterInfo { key: "status".into(), value: "all".into() }]);
    }

    #[test]
    fn pager_window_and_boundaries() {
        let first = pager(1, 10).unwrap();
        assert!(!first.previous.enabled);
        assert!(first.next.enabled);
        assert_eq!(first.next.target, 2);
        assert_eq!(first.pages.iter().map(|l| l.page).collect::<Vec<_>>(), vec![1, 2, 3]);

        let middle = pager(5, 10).unwrap();
        assert_eq!(middle.pages.iter().map(|l| l.page).collect::<Vec<_>>(), vec![3, 4, 5, 6, 7]);
        assert!(middle.pages.iter().any(|l| l.page == 5 && l.is_current));

        let last = pager(10, 10).unwrap();
        assert!(last.previous.enabled);
        assert_eq!(last.previous.target, 9);
        assert!(!last.next.enabled);

        let beyond = pager(14, 10).unwrap();
        assert!(beyond.pages.iter().any(|l| l.page == 10 && l.is_current));

        assert!(pager(1, 1).is_none());
        assert!(pager(3, 0).is_none());
    }

    #[test]
    fn pager_at_largest_page_number() {
        let info = pager(u32::MAX, u32::MAX).unwrap();
        assert!(!info.next.enabled);
        assert_eq!(info.next.target, u32::MAX);
        assert_eq!(info.previous.target, u32::MAX - 1);
        assert_eq!(info.pages.last().map(|l| l.page), Some(u32::MAX));
        assert_eq!(info.pages.len(), 3);

        let vm = render(
            &FilterState::new(ResourceKind::Products, 20),
            Some(&page(products(), u32::MAX, u32::MAX, u64::MAX)),
            &HashMap::new(),
        );
        assert!(vm.pager.is_some());
    }

    #[test]
    fn catalog_rows_use_overrides_over_server_flag() {
        let filter = FilterState::new(ResourceKind::Catalog, 10);
        let items = vec![
            record(json!({ "_id": "p1", "name": "Sofa", "isWishlisted": true })),
            record(json!({ "_id": "p2", "name": "Lamp" })),
        ];
        let overrides = HashMap::from([("p1".to_string(), false), ("p2".to_string(), true)]);
        let vm = render(&filter, Some(&page(items, 1, 1, 2)), &overrides);

        let ListBody::Rows(rows) = vm.body else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].is_wishlisted, Some(false));
        assert_eq!(rows[1].is_wishlisted, Some(true));
    }

    #[test]
    fn search_highlights_title_cell() {
        let mut store = FilterStore::new(ResourceKind::Products, 20);
        let filter = store.apply(FilterChange::search("oak"));
        let vm = render(&filter, Some(&page(products(), 1, 1, 2)), &HashMap::new());
        let ListBody::Rows(rows) = vm.body else {
            panic!("expected rows");
        };
        assert_eq!(rows[1].highlight_ranges, vec![(0, 3)]);
    }

    #[test]
    fn plain_paint_shows_each_state() {
        let theme = Theme::default();
        let filter = FilterState::new(ResourceKind::Products, 20);

        let rows = paint(&render(&filter, Some(&page(products(), 2, 4, 70)), &HashMap::new()), &theme, false, 80);
        assert!(rows.contains("Products (70) · createdAt desc"));
        assert!(rows.contains("Walnut desk"));
        assert!(rows.contains("[2]"));
        assert!(rows.contains("Showing 21-22 of 70"));
        assert!(!rows.contains('\u{1b}'));

        let empty = paint(&render(&filter, Some(&page(vec![], 1, 1, 0)), &HashMap::new()), &theme, false, 80);
        assert!(empty.contains("No products yet"));
        assert!(!empty.contains("NAME"));

        let loading = paint(&render(&filter, None, &HashMap::new()), &theme, false, 80);
        assert!(loading.contains("Loading…"));
    }

    proptest! {
        #[test]
        fn prev_and_next_disabled_exactly_at_bounds(pages in 2u32..200, seed in 0u32..200) {
            let p = seed % pages + 1;
            let info = pager(p, pages).unwrap();
            prop_assert_eq!(!info.previous.enabled, p == 1);
            prop_assert_eq!(!info.next.enabled, p == pages);
            prop_assert!(info.pages.len() <= 5);
            prop_assert!(info.pages.iter().all(|l| l.page >= 1 && l.page <= pages));
            prop_assert_eq!(info.pages.iter().filter(|l| l.is_current).count(), 1);
        }

        #[test]
        fn render_is_idempotent(count in 0u64..500, p in 1u32..30) {
            let filter = FilterState::new(ResourceKind::Products, 20);
            let pages = u32::try_from(count.div_ceil(20)).unwrap_or(u32::MAX).max(1);
            let items = if count == 0 { vec![] } else { products() };
            let outcome = page(items, p, pages, count);
            let first = render(&filter, Some(&outcome), &HashMap::new());
            let second = render(&filter, Some(&outcome), &HashMap::new());
            prop_assert_eq!(first, second);
        }
    }
}

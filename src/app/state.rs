//! Per-view state and view model computation.
//!
//! [`ListState`] is everything one list view owns for its lifetime: the
//! filter store, the view phase, the latest load outcome, the search box,
//! and row-action bookkeeping (pending delete, edit form, wishlist
//! overrides, notification). Nothing in it is shared with another view.
//!
//! [`Console`] holds the view of the active admin tab. Switching tab drops
//! the old [`ListState`] and starts a fresh one with defaults.
//!
//! # Load tokens
//!
//! Every load takes the next value of a per-view counter. A response is
//! accepted only if it carries the latest token; anything older was
//! superseded while in flight and is dropped on arrival.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use wud_console::app::{Action, ListState};
//! use wud_console::domain::ResourceKind;
//!
//! let mut state = ListState::new(ResourceKind::Products, 20, Duration::from_millis(500));
//! let action = state.begin_load();
//! assert!(matches!(action, Action::PostToWorker(_)));
//! assert!(state.phase.is_loading());
//! ```

use super::actions::Action;
use super::filter::{FilterChange, FilterState, FilterStore};
use super::form::EditForm;
use super::loader::PageResult;
use super::modes::{Notification, ViewPhase};
use crate::domain::{LoadError, ResourceKind};
use crate::ui::viewmodel::{FormInfo, ListViewModel};
use crate::worker::WorkerMessage;
use std::collections::HashMap;
use std::time::Duration;

/// State of one list view.
#[derive(Debug, Clone)]
pub struct ListState {
    filters: FilterStore,

    /// Lifecycle phase.
    pub phase: ViewPhase,

    /// Outcome of the latest accepted load.
    ///
    /// Replaced wholesale on every accepted response; cleared when a new
    /// load starts so a stale list is never shown.
    outcome: Option<Result<PageResult, LoadError>>,

    latest_token: u64,

    /// Search box text as typed; applied to the filter when the debounce
    /// window settles.
    pub search_input: String,

    search_generation: u64,

    /// Debounce window for the search box.
    pub debounce: Duration,

    /// Record awaiting delete confirmation.
    pub(crate) pending_delete: Option<String>,

    pub edit_form: Option<EditForm>,

    pub notification: Option<Notification>,

    /// Optimistic wishlist states by record id.
    pub(crate) wishlist: HashMap<String, bool>,

    /// Wishlist toggles still awaiting the server, counted per record id.
    pending_wishlist: HashMap<String, u32>,

    /// Record whose full fetch for the edit form was requested last.
    pub(crate) pending_edit: Option<String>,
}

impl ListState {
    /// Creates an idle view with the default parameters of `resource`.
    ///
    /// `page_size` outside the presets falls back to the default size;
    /// `debounce` is the search box settle window.
    #[must_use]
    pub fn new(resource: ResourceKind, page_size: u32, debounce: Duration) -> Self {
        Self {
            filters: FilterStore::new(resource, page_size),
            phase: ViewPhase::Idle,
            outcome: None,
            latest_token: 0,
            search_input: String::new(),
            search_generation: 0,
            debounce,
            pending_delete: None,
            edit_form: None,
            notification: None,
            wishlist: HashMap::new(),
            pending_wishlist: HashMap::new(),
            pending_edit: None,
        }
    }

    #[must_use]
    pub const fn resource(&self) -> ResourceKind {
        self.filters.current().resource
    }

    /// Current filter parameters.
    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        self.filters.current()
    }

    /// Merges a filter change; see [`FilterStore::apply`].
    pub fn apply_filters(&mut self, change: FilterChange) -> FilterState {
        self.filters.apply(change)
    }

    /// Outcome of the latest accepted load.
    #[must_use]
    pub const fn outcome(&self) -> Option<&Result<PageResult, LoadError>> {
        self.outcome.as_ref()
    }

    /// Current page, if the latest load succeeded.
    #[must_use]
    pub fn page_result(&self) -> Option<&PageResult> {
        self.outcome.as_ref().and_then(|o| o.as_ref().ok())
    }

    #[must_use]
    pub const fn latest_token(&self) -> u64 {
        self.latest_token
    }

    /// Starts a load for the current parameters, superseding any in flight.
    pub fn begin_load(&mut self) -> Action {
        self.latest_token += 1;
        self.phase = ViewPhase::Loading;
        self.outcome = None;

        tracing::debug!(
            resource = %self.resource(),
            token = self.latest_token,
            page = self.filter().page,
            "starting load"
        );

        Action::PostToWorker(WorkerMessage::load_page(self.latest_token, self.filters.get()))
    }

    /// Records a load outcome.
    ///
    /// Returns `false`, leaving the state untouched, if `token` is not the
    /// latest one.
    pub fn accept_page(&mut self, token: u64, result: Result<PageResult, LoadError>) -> bool {
        if token != self.latest_token {
            tracing::debug!(
                token = token,
                latest = self.latest_token,
                "discarding superseded response"
            );
            return false;
        }

        self.phase = if result.is_ok() {
            let pending = &self.pending_wishlist;
            self.wishlist.retain(|id, _| pending.contains_key(id));
            ViewPhase::Loaded
        } else {
            ViewPhase::Error
        };
        self.outcome = Some(result);
        true
    }

    /// Records a keystroke in the search box and returns its generation.
    pub fn type_search(&mut self, text: impl Into<String>) -> u64 {
        self.search_input = text.into();
        self.search_generation += 1;
        self.search_generation
    }

    /// Returns `true` if no keystroke happened after `generation`.
    #[must_use]
    pub const fn is_current_search(&self, generation: u64) -> bool {
        generation == self.search_generation
    }

    /// Drops any pending debounce and aligns the search box with `text`.
    pub fn sync_search(&mut self, text: &str) {
        self.search_input = text.to_string();
        self.search_generation += 1;
    }

    /// Returns `true` while typed text differs from the applied search.
    #[must_use]
    pub fn search_pending(&self) -> bool {
        self.search_input != self.filter().search
    }

    /// Wishlist state of a record on the current page.
    #[must_use]
    pub fn is_wishlisted(&self, id: &str) -> Option<bool> {
        self.page_result()
            .and_then(|page| page.find(id))
            .map(|record| crate::ui::wishlist_state(record, &self.wishlist))
    }

    /// Sets an optimistic wishlist state.
    pub fn set_wishlisted(&mut self, id: impl Into<String>, wishlisted: bool) {
        self.wishlist.insert(id.into(), wishlisted);
    }

    /// Records a toggle sent to the server.
    ///
    /// The override survives reloads until every toggle of that record has
    /// been answered, since a page fetched in the meantime may predate it.
    pub fn begin_wishlist_toggle(&mut self, id: &str, wishlisted: bool) {
        self.set_wishlisted(id, wishlisted);
        *self.pending_wishlist.entry(id.to_string()).or_default() += 1;
    }

    /// Records the server's answer to a toggle; a failure reverts it.
    pub fn finish_wishlist_toggle(&mut self, id: &str, wishlisted: bool, succeeded: bool) {
        if let Some(count) = self.pending_wishlist.get_mut(id) {
            *count -= 1;
            if *count == 0 {
                self.pending_wishlist.remove(id);
            }
        }
        if !succeeded {
            self.set_wishlisted(id, !wishlisted);
        }
    }

    /// Returns `true` while a toggle of `id` awaits the server.
    #[must_use]
    pub fn wishlist_pending(&self, id: &str) -> bool {
        self.pending_wishlist.contains_key(id)
    }

    /// Page to show after one record on the current page was removed.
    ///
    /// Stays on the current page unless it no longer exists, then falls
    /// back to the last valid page.
    #[must_use]
    pub fn page_after_removal(&self) -> u32 {
        let filter = self.filter();
        let Some(result) = self.page_result() else {
            return filter.page;
        };

        let remaining = result.count.saturating_sub(1);
        let last = remaining.div_ceil(u64::from(filter.page_size)).max(1);
        let last = u32::try_from(last).unwrap_or(u32::MAX);
        filter.page.min(last)
    }

    /// Display title of a record on the current page, falling back to its id.
    #[must_use]
    pub fn record_title(&self, id: &str) -> String {
        let resource = self.resource();
        self.page_result()
            .and_then(|page| page.find(id))
            .map(|record| record.first_display(&[resource.columns()[0].field, "name", "title"]))
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| id.to_string())
    }

    /// Computes the view model for the current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ListViewModel {
        let mut vm = crate::ui::render(self.filter(), self.outcome(), &self.wishlist);

        vm.search_bar.query.clone_from(&self.search_input);
        vm.search_bar.pending = self.search_pending();
        vm.notification.clone_from(&self.notification);
        vm.confirmation = self
            .pending_delete
            .as_ref()
            .map(|id| delete_question(&self.record_title(id)));
        vm.form = self.edit_form.as_ref().map(|form| self.form_info(form));

        vm
    }

    fn form_info(&self, form: &EditForm) -> FormInfo {
        let resource = self.resource();
        let mut names: Vec<String> = resource
            .required_fields()
            .iter()
            .chain(resource.columns().iter().map(|c| &c.field))
            .map(|s| (*s).to_string())
            .collect();
        if let Some(record) = &form.record {
            names.extend(record.fields.keys().filter(|k| !k.starts_with('_')).cloned());
        }

        let mut seen = std::collections::HashSet::new();
        names.retain(|name| seen.insert(name.clone()));

        FormInfo {
            title: form.title(resource),
            fields: names
                .into_iter()
                .map(|name| {
                    let value = form
                        .record
                        .as_ref()
                        .map(|r| r.display(&name))
                        .unwrap_or_default();
                    (name, value)
                })
                .collect(),
            required: resource
                .required_fields()
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

/// Confirmation question for deleting a record.
#[must_use]
pub fn delete_question(title: &str) -> String {
    format!("Delete \"{title}\"? This cannot be undone.")
}

/// The admin console: one active list view at a time.
#[derive(Debug, Clone)]
pub struct Console {
    active: ListState,
    page_size: u32,
    debounce: Duration,
}

impl Console {
    /// Creates a console showing `resource`; later tabs reuse `page_size`
    /// and `debounce`.
    #[must_use]
    pub fn new(resource: ResourceKind, page_size: u32, debounce: Duration) -> Self {
        Self {
            active: ListState::new(resource, page_size, debounce),
            page_size,
            debounce,
        }
    }

    #[must_use]
    pub const fn active(&self) -> &ListState {
        &self.active
    }

    pub fn active_mut(&mut self) -> &mut ListState {
        &mut self.active
    }

    /// Shows another listing.
    ///
    /// The previous view's state is discarded; the new view starts from
    /// defaults and begins loading. Re-selecting the active tab does nothing.
    pub fn switch_to(&mut self, resource: ResourceKind) -> Vec<Action> {
        if resource == self.active.resource() {
            return vec![];
        }

        tracing::debug!(from = %self.active.resource(), to = %resource, "switching tab");
        self.active = ListState::new(resource, self.page_size, self.debounce);
        vec![self.active.begin_load()]
    }

    /// Tabs in display order with the active one marked.
    #[must_use]
    pub fn tabs(&self) -> Vec<(ResourceKind, bool)> {
        ResourceKind::ALL
            .into_iter()
            .filter(|kind| kind.is_admin())
            .map(|kind| (kind, kind == self.active.resource()))
            .collect()
    }
}

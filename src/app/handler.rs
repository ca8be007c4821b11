//! Event handling and state transitions.
//!
//! [`handle_event`] is the action dispatcher of a list view. It mutates the
//! [`ListState`] synchronously and returns the side effects to run; it never
//! awaits anything itself.
//!
//! # Event Types
//!
//! - **Loading**: `Open`, `Refresh`
//! - **Filters**: `SearchInput`, `SearchSettled`, `ChangeFilters`, `GoToPage`
//! - **Row actions**: `RequestDelete`, `ConfirmationAnswered`, `Edit`,
//!   `NewRecord`, `SubmitForm`, `CancelForm`, `ToggleWishlist`
//! - **Chrome**: `DismissNotification`
//! - **Worker**: `Worker` with a typed [`WorkerResponse`]
//!
//! The returned flag tells the runtime whether the view must be redrawn.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use wud_console::app::{handle_event, Action, Event, ListState};
//! use wud_console::domain::ResourceKind;
//!
//! let mut state = ListState::new(ResourceKind::Orders, 20, Duration::from_millis(500));
//! let (render, actions) = handle_event(&mut state, &Event::SearchInput("oak".into()))?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::ScheduleSearch { .. }));
//! # Ok::<(), wud_console::domain::ConsoleError>(())
//! ```

use crate::app::filter::FilterChange;
use crate::app::form::{EditForm, FormSubmission};
use crate::app::modes::Notification;
use crate::app::state::delete_question;
use crate::app::{Action, ListState};
use crate::domain::error::Result;
use crate::domain::{ConsoleError, ResourceKind};
use crate::worker::{WorkerMessage, WorkerResponse};

/// Inputs to a list view.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The view was shown for the first time.
    Open,
    /// Reload the current parameters.
    Refresh,

    /// The search box now holds this text (fires on every keystroke).
    SearchInput(String),
    /// The debounce timer for a search generation elapsed.
    SearchSettled {
        generation: u64,
    },
    /// A selector changed (status, category, role, sort, order, page size).
    ChangeFilters(FilterChange),
    /// A pager link was clicked.
    GoToPage(u32),

    /// Delete was clicked on a row; asks for confirmation first.
    RequestDelete {
        id: String,
    },
    /// The user answered the pending confirmation.
    ConfirmationAnswered {
        confirmed: bool,
    },
    /// Edit was clicked on a row; fetches the full record first.
    Edit {
        id: String,
    },
    /// Opens an empty form for a new record.
    NewRecord,
    /// The edit form was submitted.
    SubmitForm(FormSubmission),
    /// The edit form was closed without saving.
    CancelForm,
    /// The wishlist button was clicked on a catalog row.
    ToggleWishlist {
        id: String,
    },

    DismissNotification,

    /// A background Data API call finished.
    Worker(WorkerResponse),
}

/// Processes an event, mutates the view state and returns actions to run.
///
/// # Errors
///
/// Reserved for failures the view cannot surface itself; every Data API and
/// validation failure becomes view state instead.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut ListState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", resource = %state.resource(), event_type = ?event).entered();

    let resource = state.resource();

    match event {
        Event::Open | Event::Refresh => Ok((true, vec![state.begin_load()])),

        Event::SearchInput(text) => {
            let generation = state.type_search(text.clone());
            tracing::trace!(query = %text, generation = generation, "search input");
            Ok((
                true,
                vec![Action::ScheduleSearch {
                    generation,
                    delay: state.debounce,
                }],
            ))
        }
        Event::SearchSettled { generation } => {
            if !state.is_current_search(*generation) {
                tracing::trace!(generation = generation, "stale search timer");
                return Ok((false, vec![]));
            }

            let query = state.search_input.clone();
            tracing::debug!(query = %query, "applying search");
            state.apply_filters(FilterChange::search(query));
            Ok((true, vec![state.begin_load()]))
        }
        Event::ChangeFilters(change) => {
            if let Some(search) = &change.search {
                state.sync_search(search);
            }

            let before = state.filter().clone();
            let after = state.apply_filters(change.clone());
            if after == before {
                tracing::debug!("filter change not accepted, keeping current listing");
                return Ok((false, vec![]));
            }
            Ok((true, vec![state.begin_load()]))
        }
        Event::GoToPage(page) => {
            let target = match state.page_result() {
                Some(result) => (*page).min(result.pages),
                None => *page,
            };
            if target == state.filter().page {
                return Ok((false, vec![]));
            }

            state.apply_filters(FilterChange::page(target));
            Ok((true, vec![state.begin_load()]))
        }

        Event::RequestDelete { id } => {
            if !resource.is_admin() {
                tracing::debug!("delete is not available on this listing");
                return Ok((false, vec![]));
            }

            state.pending_delete = Some(id.clone());
            Ok((
                true,
                vec![Action::PromptConfirmation {
                    message: delete_question(&state.record_title(id)),
                }],
            ))
        }
        Event::ConfirmationAnswered { confirmed } => {
            let Some(id) = state.pending_delete.take() else {
                tracing::debug!("no confirmation pending");
                return Ok((false, vec![]));
            };

            if *confirmed {
                tracing::debug!(id = %id, "delete confirmed");
                Ok((true, vec![Action::PostToWorker(WorkerMessage::delete_record(resource, id))]))
            } else {
                tracing::debug!(id = %id, "delete cancelled");
                Ok((true, vec![]))
            }
        }
        Event::Edit { id } => {
            if !resource.is_admin() {
                return Ok((false, vec![]));
            }
            state.pending_edit = Some(id.clone());
            Ok((false, vec![Action::PostToWorker(WorkerMessage::fetch_record(resource, id.clone()))]))
        }
        Event::NewRecord => {
            if !resource.is_admin() {
                return Ok((false, vec![]));
            }
            state.pending_edit = None;
            state.edit_form = Some(EditForm::blank());
            Ok((true, vec![]))
        }
        Event::SubmitForm(submission) => match submission.validate(resource) {
            Ok(()) => Ok((
                false,
                vec![Action::PostToWorker(WorkerMessage::save_record(resource, submission.clone()))],
            )),
            Err(ConsoleError::Validation(reason)) => {
                tracing::debug!(reason = %reason, "submission blocked by validation");
                state.notification = Some(Notification::error(reason));
                Ok((true, vec![]))
            }
            Err(e) => Err(e),
        },
        Event::CancelForm => {
            let was_open = state.edit_form.take().is_some();
            Ok((was_open, vec![]))
        }
        Event::ToggleWishlist { id } => {
            if !resource.has_wishlist() {
                return Ok((false, vec![]));
            }
            let Some(current) = state.is_wishlisted(id) else {
                tracing::debug!(id = %id, "wishlist toggle for a record not on this page");
                return Ok((false, vec![]));
            };

            state.begin_wishlist_toggle(id, !current);
            Ok((
                true,
                vec![Action::PostToWorker(WorkerMessage::set_wishlist(resource, id.clone(), !current))],
            ))
        }

        Event::DismissNotification => Ok((state.notification.take().is_some(), vec![])),

        Event::Worker(response) => Ok(handle_worker_response(state, resource, response)),
    }
}

fn handle_worker_response(
    state: &mut ListState,
    resource: ResourceKind,
    response: &WorkerResponse,
) -> (bool, Vec<Action>) {
    if response.resource() != resource {
        tracing::debug!(
            response_resource = %response.resource(),
            "discarding response for a view that is no longer shown"
        );
        return (false, vec![]);
    }

    let mut actions = vec![];

    let render = match response {
        WorkerResponse::PageLoaded { token, result, .. } => {
            let accepted = state.accept_page(*token, result.clone());
            if accepted && response.is_unauthorized() {
                actions.push(Action::InvalidateSession);
            }
            accepted
        }
        WorkerResponse::RecordFetched { id, result, .. } => {
            if state.pending_edit.as_deref() != Some(id.as_str()) {
                tracing::debug!(id = %id, "discarding record fetched for a superseded edit");
                return (false, vec![]);
            }
            state.pending_edit = None;

            match result {
                Ok(record) => state.edit_form = Some(EditForm::editing(record.clone())),
                Err(e) => {
                    tracing::debug!(id = %id, error = %e, "could not open record for editing");
                    state.notification = Some(Notification::error(e.user_message()));
                }
            }
            true
        }
        WorkerResponse::RecordDeleted { id, result, .. } => {
            match result {
                Ok(()) => {
                    state.notification = Some(Notification::info(format!("{} deleted", state.record_title(id))));
                    let target = state.page_after_removal();
                    if target != state.filter().page {
                        state.apply_filters(FilterChange::page(target));
                    }
                    actions.push(state.begin_load());
                }
                Err(e) => state.notification = Some(Notification::error(e.user_message())),
            }
            true
        }
        WorkerResponse::RecordSaved { created, result, .. } => {
            match result {
                Ok(()) => {
                    state.edit_form = None;
                    let message = if *created { "Record created" } else { "Changes saved" };
                    state.notification = Some(Notification::info(message));
                    actions.push(state.begin_load());
                }
                Err(e) => state.notification = Some(Notification::error(e.user_message())),
            }
            true
        }
        WorkerResponse::WishlistUpdated {
            id,
            wishlisted,
            result,
            ..
        } => {
            state.finish_wishlist_toggle(id, *wishlisted, result.is_ok());
            match result {
                Ok(()) => false,
                Err(e) => {
                    tracing::debug!(id = %id, error = %e, "reverted wishlist toggle");
                    state.notification = Some(Notification::error(e.user_message()));
                    true
                }
            }
        }
    };

    if response.is_unauthorized() && !matches!(response, WorkerResponse::PageLoaded { .. }) {
        actions.push(Action::InvalidateSession);
    }

    (render, actions)
}

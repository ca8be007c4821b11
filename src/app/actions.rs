//! Side effects requested by the dispatcher.
//!
//! [`handle_event`](super::handle_event) never touches the network, the clock
//! or the terminal. It returns a `Vec<Action>` and the runtime carries them
//! out in order, feeding any result back in as a new event.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use wud_console::app::Action;
//!
//! let action = Action::ScheduleSearch { generation: 3, delay: Duration::from_millis(500) };
//! assert!(matches!(action, Action::ScheduleSearch { generation: 3, .. }));
//! ```

use crate::worker::WorkerMessage;
use std::time::Duration;

/// Commands executed by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Runs a Data API call on a background task.
    ///
    /// The response comes back as [`Event::Worker`](super::Event::Worker).
    PostToWorker(WorkerMessage),

    /// Starts the search debounce timer.
    ///
    /// After `delay` the runtime emits
    /// [`Event::SearchSettled`](super::Event::SearchSettled) with the same
    /// generation. Later keystrokes make earlier generations stale.
    ScheduleSearch {
        generation: u64,
        delay: Duration,
    },

    /// Asks the user to confirm a destructive action.
    ///
    /// The answer comes back as
    /// [`Event::ConfirmationAnswered`](super::Event::ConfirmationAnswered).
    PromptConfirmation {
        /// Question shown to the user.
        message: String,
    },

    /// The Data API rejected the credential (HTTP 401).
    ///
    /// The session must be re-established outside the list view.
    InvalidateSession,
}

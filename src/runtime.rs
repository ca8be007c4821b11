//! Runtime driving a [`Console`].
//!
//! The runtime owns everything [`handle_event`] is not allowed to touch:
//! spawned tokio tasks for Data API calls, debounce timers and the
//! confirmation prompt. Results come back through an unbounded channel and
//! are dispatched like any other event.
//!
//! ```text
//! dispatch(Event) → handle_event → Actions
//!                                    ├─ PostToWorker      → tokio::spawn → Event::Worker
//!                                    ├─ ScheduleSearch    → sleep        → Event::SearchSettled
//!                                    ├─ PromptConfirmation → prompt      → Event::ConfirmationAnswered
//!                                    └─ InvalidateSession → flag
//! ```

use crate::api::DataApi;
use crate::app::{handle_event, Action, Console, Event, ListState};
use crate::domain::error::Result;
use crate::domain::{ConsoleError, ResourceKind};
use crate::ui::{paint, Theme};
use crate::worker::ApiWorker;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Answers confirmation questions for destructive actions.
pub trait ConfirmationPrompt: Send {
    /// Returns `true` if the user accepted.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompt with a fixed answer, for `--yes` style flags and tests.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl ConfirmationPrompt for AutoConfirm {
    fn confirm(&mut self, message: &str) -> bool {
        tracing::debug!(message = %message, answer = self.0, "auto-answering confirmation");
        self.0
    }
}

/// Event loop for one console.
pub struct ListRuntime {
    console: Console,
    worker: ApiWorker,
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    prompt: Box<dyn ConfirmationPrompt>,
    session_invalidated: bool,
    /// Spawned tasks whose event has not been received yet.
    in_flight: usize,
}

impl std::fmt::Debug for ListRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListRuntime")
            .field("resource", &self.console.active().resource())
            .field("session_invalidated", &self.session_invalidated)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl ListRuntime {
    #[must_use]
    pub fn new(console: Console, api: Arc<dyn DataApi>, prompt: Box<dyn ConfirmationPrompt>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            console,
            worker: ApiWorker::new(api),
            tx,
            rx,
            prompt,
            session_invalidated: false,
            in_flight: 0,
        }
    }

    /// State of the listing currently shown.
    #[must_use]
    pub const fn state(&self) -> &ListState {
        self.console.active()
    }

    #[must_use]
    pub const fn console(&self) -> &Console {
        &self.console
    }

    /// Whether a Data API call came back with HTTP 401.
    #[must_use]
    pub const fn session_invalidated(&self) -> bool {
        self.session_invalidated
    }

    /// Whether spawned work is still outstanding.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Handles an event and every synchronous follow-up it causes.
    ///
    /// Must be called inside a tokio runtime. Returns `true` if the view
    /// should be redrawn.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`handle_event`].
    pub fn dispatch(&mut self, event: Event) -> Result<bool> {
        let mut queue = VecDeque::from([event]);
        let mut should_render = false;

        while let Some(event) = queue.pop_front() {
            let (render, actions) = handle_event(self.console.active_mut(), &event)?;
            should_render |= render;

            for action in actions {
                self.execute(action, &mut queue);
            }
        }

        Ok(should_render)
    }

    /// Switches to another listing and starts loading it.
    pub fn switch_tab(&mut self, resource: ResourceKind) -> bool {
        let actions = self.console.switch_to(resource);
        let switched = !actions.is_empty();

        let mut queue = VecDeque::new();
        for action in actions {
            self.execute(action, &mut queue);
        }
        debug_assert!(queue.is_empty());
        switched
    }

    fn execute(&mut self, action: Action, queue: &mut VecDeque<Event>) {
        match action {
            Action::PostToWorker(message) => {
                self.in_flight += 1;
                let worker = self.worker.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let response = worker.handle_message(message).await;
                    let _ = tx.send(Event::Worker(response));
                });
            }
            Action::ScheduleSearch { generation, delay } => {
                self.in_flight += 1;
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(Event::SearchSettled { generation });
                });
            }
            Action::PromptConfirmation { message } => {
                let confirmed = self.prompt.confirm(&message);
                queue.push_back(Event::ConfirmationAnswered { confirmed });
            }
            Action::InvalidateSession => {
                tracing::warn!(resource = %self.state().resource(), "session rejected by the server");
                self.session_invalidated = true;
            }
        }
    }

    /// Waits for the next spawned task to report back and dispatches it.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Worker`] if nothing is outstanding, otherwise
    /// propagates [`dispatch`](Self::dispatch) errors.
    pub async fn step(&mut self) -> Result<bool> {
        if self.in_flight == 0 {
            return Err(ConsoleError::Worker("no outstanding work".to_string()));
        }

        let event = self
            .rx
            .recv()
            .await
            .ok_or_else(|| ConsoleError::Worker("event channel closed".to_string()))?;
        self.in_flight -= 1;
        self.dispatch(event)
    }

    /// Runs until all spawned work, including follow-ups, has finished.
    ///
    /// # Errors
    ///
    /// Propagates [`step`](Self::step) errors.
    pub async fn settle(&mut self) -> Result<()> {
        while self.in_flight > 0 {
            self.step().await?;
        }
        Ok(())
    }

    /// Paints the current view.
    #[must_use]
    pub fn render(&self, theme: &Theme, color: bool, cols: usize) -> String {
        paint(&self.state().compute_viewmodel(), theme, color, cols)
    }
}

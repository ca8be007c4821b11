//! Application layer coordinating state, events, and actions.
//!
//! This module is the list/filter/pagination controller shared by every
//! listing in the console. It sits between the runtime (which owns the tokio
//! tasks) and the domain/api/worker layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`filter`]: Filter state store and query construction
//! - [`form`]: Edit form state, validation and request bodies
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`loader`]: Data API loader and envelope normalization
//! - [`modes`]: View phase and notification types
//! - [`state`]: List view state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use wud_console::app::{handle_event, Event, ListState};
//! use wud_console::domain::ResourceKind;
//!
//! let mut state = ListState::new(ResourceKind::Products, 20, Duration::from_millis(500));
//! let (render, actions) = handle_event(&mut state, &Event::Open)?;
//! assert!(render);
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), wud_console::domain::ConsoleError>(())
//! ```

pub mod actions;
pub mod filter;
pub mod form;
pub mod handler;
pub mod loader;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use filter::{FilterChange, FilterState, FilterStore, FilterValue, SortOrder};
pub use form::{EditForm, FormSubmission};
pub use handler::{handle_event, Event};
pub use loader::{parse_envelope, Loader, PageResult};
pub use modes::{Notification, NotificationLevel, ViewPhase};
pub use state::{Console, ListState};

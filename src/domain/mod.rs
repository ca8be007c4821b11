//! Domain layer for the Wud' console.
//!
//! This module contains the types shared by every other layer, independent of
//! HTTP, terminal rendering or the async runtime.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`resource`]: The catalogue of listings (products, orders, ...)
//! - [`record`]: Schema-less resource records

pub mod error;
pub mod record;
pub mod resource;

pub use error::{ApiError, ConsoleError, LoadError, LoadErrorKind, Result};
pub use record::Record;
pub use resource::{Column, FilterSpec, ResourceKind};

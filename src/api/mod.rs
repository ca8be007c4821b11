//! Data API collaborator.
//!
//! The list controller talks to the shop's REST API exclusively through the
//! [`DataApi`] trait. This module provides the trait, the transport-agnostic
//! [`ApiRequest`] description, and the `reqwest`-based [`HttpDataApi`].
//!
//! # Modules
//!
//! - `client`: the [`DataApi`] trait
//! - `request`: request, body and attachment types
//! - `http`: HTTP implementation and response interpretation

pub mod client;
pub mod http;
pub mod request;

pub use client::DataApi;
pub use http::{interpret_response, HttpDataApi};
pub use request::{ApiRequest, Attachment, Method, RequestBody};

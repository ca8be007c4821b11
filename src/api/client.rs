//! Data API abstraction.
//!
//! This module defines the [`DataApi`] trait, the single seam between the
//! list controller and the network. The controller only ever sees parsed JSON
//! or an [`ApiError`]; transport details live in the implementations.
//!
//! # Implementations
//!
//! - [`HttpDataApi`](super::HttpDataApi): `reqwest` client against the shop's
//!   REST API
//! - in-memory doubles in tests

use crate::api::request::ApiRequest;
use crate::domain::ApiError;
use futures_util::future::BoxFuture;
use serde_json::Value;

/// Uniform request function of the Data API collaborator.
///
/// Implementations must:
/// - attach the bearer credential when `requires_auth` is set and one is
///   available
/// - parse JSON bodies, wrapping non-JSON text as `{"message": <text>}`
/// - turn non-2xx responses into [`ApiError::Status`] carrying the parsed
///   body
///
/// Requests are never retried.
pub trait DataApi: Send + Sync {
    /// Issues a request and resolves to the parsed response body.
    fn request(&self, request: ApiRequest) -> BoxFuture<'_, Result<Value, ApiError>>;
}

//! Loader: filter state in, page of records out.
//!
//! A [`Loader`] is bound to one listing. It turns a [`FilterState`] into a
//! list request, hands it to the [`DataApi`], and normalises the response
//! envelope into a [`PageResult`]. Envelopes differ between endpoints: the
//! collection may sit under a resource-specific key (`products`, `posts`),
//! a generic one (`items`, `data`, `results`), or the body may be a bare
//! array. The first key present wins.
//!
//! The loader also carries the single-record calls the dispatcher needs
//! (fetch by id, create/update, delete, wishlist). None of them retry.

use crate::api::{ApiRequest, DataApi, RequestBody};
use crate::app::filter::FilterState;
use crate::app::form::FormSubmission;
use crate::domain::{ApiError, LoadError, Record, ResourceKind};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::Instrument;

/// Collection keys tried after the listing's own keys.
const GENERIC_COLLECTION_KEYS: [&str; 3] = ["items", "data", "results"];

const PAGE_KEYS: [&str; 2] = ["page", "currentPage"];
const PAGES_KEYS: [&str; 2] = ["pages", "totalPages"];
const COUNT_KEYS: [&str; 3] = ["count", "total", "totalItems"];

/// One page of a listing.
///
/// Recomputed on every load and never merged with a previous page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    /// Records on this page, in server order.
    pub items: Vec<Record>,
    /// Current 1-indexed page.
    pub page: u32,
    /// Total number of pages, at least 1.
    pub pages: u32,
    /// Total number of records across all pages.
    pub count: u64,
}

impl PageResult {
    /// Returns the record with the given id, if it is on this page.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Record> {
        self.items.iter().find(|r| r.id == id)
    }
}

/// Data API access for one listing.
#[derive(Clone)]
pub struct Loader {
    resource: ResourceKind,
    api: Arc<dyn DataApi>,
}

impl std::fmt::Debug for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

impl Loader {
    /// Creates a loader for `resource` over any [`DataApi`].
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use wud_console::api::HttpDataApi;
    /// use wud_console::app::{FilterState, Loader};
    /// use wud_console::domain::ResourceKind;
    ///
    /// let api = Arc::new(HttpDataApi::new("http://localhost:5000/api", None)?);
    /// let loader = Loader::new(ResourceKind::Orders, api);
    ///
    /// let request = loader.build_request(&FilterState::new(ResourceKind::Orders, 20));
    /// assert_eq!(request.path, "/orders");
    /// assert_eq!(request.query_value("sortOrder"), Some("desc"));
    /// # Ok::<(), wud_console::domain::ApiError>(())
    /// ```
    #[must_use]
    pub fn new(resource: ResourceKind, api: Arc<dyn DataApi>) -> Self {
        Self { resource, api }
    }

    #[must_use]
    pub const fn resource(&self) -> ResourceKind {
        self.resource
    }

    /// Builds the list request for a filter snapshot.
    #[must_use]
    pub fn build_request(&self, filter: &FilterState) -> ApiRequest {
        ApiRequest::get(self.resource.endpoint())
            .with_query(filter.to_query())
            .authenticated(self.resource.requires_auth())
    }

    fn record_path(&self, id: &str) -> String {
        format!("{}/{id}", self.resource.endpoint())
    }

    /// Loads the page described by `filter`.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] classified by origin; a response without a
    /// recognisable item collection is a server error.
    pub async fn load(&self, filter: &FilterState) -> Result<PageResult, LoadError> {
        let request = self.build_request(filter);
        let span = tracing::debug_span!(
            "load_page",
            resource = %self.resource,
            page = filter.page,
            page_size = filter.page_size
        );

        async move {
            let body = self.api.request(request).await.map_err(|e| {
                tracing::debug!(error = %e, "list request failed");
                LoadError::from(e)
            })?;

            let result = parse_envelope(self.resource, body, filter.page, filter.page_size)?;
            tracing::debug!(
                items = result.items.len(),
                pages = result.pages,
                count = result.count,
                "page loaded"
            );
            Ok::<PageResult, LoadError>(result)
        }
        .instrument(span)
        .await
    }

    /// Fetches the full record; list rows may be summaries.
    ///
    /// # Errors
    ///
    /// Returns the Data API error, or [`ApiError::Decode`] if the body holds
    /// no record.
    pub async fn fetch_one(&self, id: &str) -> Result<Record, ApiError> {
        let request = ApiRequest::get(self.record_path(id))
            .authenticated(self.resource.requires_auth());
        let body = self.api.request(request).await?;
        extract_record(body).ok_or_else(|| ApiError::Decode(format!("no record in response for '{id}'")))
    }

    /// Deletes a record.
    ///
    /// # Errors
    ///
    /// Returns the Data API error.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.api
            .request(ApiRequest::delete(self.record_path(id)))
            .await
            .map(|_| ())
    }

    /// Creates (no id) or updates a record.
    ///
    /// # Errors
    ///
    /// Returns the Data API error.
    pub async fn save(&self, submission: FormSubmission) -> Result<(), ApiError> {
        let request = match submission.id.clone() {
            Some(id) => ApiRequest::put(self.record_path(&id), submission.into_body()),
            None => ApiRequest::post(self.resource.endpoint(), submission.into_body()),
        };
        self.api.request(request).await.map(|_| ())
    }

    /// Adds a product to, or removes it from, the signed-in customer's wishlist.
    ///
    /// # Errors
    ///
    /// Returns the Data API error.
    pub async fn set_wishlist(&self, id: &str, wishlisted: bool) -> Result<(), ApiError> {
        let path = format!("/wishlist/{id}");
        let request = if wishlisted {
            ApiRequest::post(path, RequestBody::Json(json!({})))
        } else {
            ApiRequest::delete(path)
        };
        self.api.request(request).await.map(|_| ())
    }
}

/// Normalises a list response into a [`PageResult`].
///
/// Missing metadata is derived: `count` from the number of items, `pages`
/// from `count` and `page_size`, `page` from the requested page. Metadata is
/// read from the envelope itself or a nested `pagination` object.
///
/// # Errors
///
/// [`ApiError::Decode`] if the body is neither an array nor an object with
/// an array under a known collection key.
pub fn parse_envelope(
    resource: ResourceKind,
    body: Value,
    requested_page: u32,
    page_size: u32,
) -> Result<PageResult, ApiError> {
    let mut envelope = match body {
        Value::Array(items) => {
            let items = to_records(items);
            return Ok(PageResult {
                count: items.len() as u64,
                page: 1,
                pages: 1,
                items,
            });
        }
        Value::Object(map) => map,
        other => {
            return Err(ApiError::Decode(format!(
                "expected an object or array, got {}",
                json_kind(&other)
            )))
        }
    };

    let key = resource
        .collection_keys()
        .iter()
        .chain(GENERIC_COLLECTION_KEYS.iter())
        .find(|key| envelope.contains_key(**key))
        .ok_or_else(|| ApiError::Decode("no item collection in response".to_string()))?;

    let items = match envelope.remove(*key) {
        Some(Value::Array(items)) => to_records(items),
        Some(other) => {
            return Err(ApiError::Decode(format!(
                "`{key}` holds {} instead of an array",
                json_kind(&other)
            )))
        }
        None => Vec::new(),
    };

    let count = read_number(&envelope, &COUNT_KEYS).unwrap_or(items.len() as u64);
    let pages = read_number(&envelope, &PAGES_KEYS)
        .unwrap_or_else(|| count.div_ceil(u64::from(page_size.max(1))))
        .max(1);
    let page = read_number(&envelope, &PAGE_KEYS).unwrap_or(u64::from(requested_page)).max(1);

    Ok(PageResult {
        items,
        page: clamp_u32(page),
        pages: clamp_u32(pages),
        count,
    })
}

fn to_records(items: Vec<Value>) -> Vec<Record> {
    let total = items.len();
    let records: Vec<Record> = items.into_iter().filter_map(Record::from_value).collect();
    if records.len() != total {
        tracing::debug!(dropped = total - records.len(), "skipping non-object list items");
    }
    records
}

fn read_number(envelope: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    let nested = envelope.get("pagination").and_then(Value::as_object);

    keys.iter().find_map(|key| {
        envelope
            .get(*key)
            .and_then(as_count)
            .or_else(|| nested.and_then(|p| p.get(*key)).and_then(as_count))
    })
}

fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn clamp_u32(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// Pulls a single record out of a get-by-id response, which may be the
/// record itself or wrap it (`{"product": {...}}`, `{"data": {...}}`).
fn extract_record(body: Value) -> Option<Record> {
    let Value::Object(map) = body else {
        return None;
    };

    if map.contains_key("_id") || map.contains_key("id") {
        return Record::from_value(Value::Object(map));
    }

    map.into_iter()
        .filter_map(|(_, value)| Record::from_value(value))
        .find(|record| !record.id.is_empty())
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

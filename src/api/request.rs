//! Request description passed to the Data API.
//!
//! An [`ApiRequest`] is transport-agnostic: a path relative to the API base
//! URL, a method, query parameters, an optional body and whether the bearer
//! credential must be attached.

use serde_json::Value;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A file attached to a multipart submission (e.g. a product image).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Form field name (e.g. `images`).
    pub field: String,
    /// File name sent to the server.
    pub file_name: String,
    /// MIME type (e.g. `image/jpeg`).
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Request body.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Serialized as `application/json`.
    Json(Value),
    /// Serialized as `multipart/form-data`.
    Multipart {
        /// Text fields.
        fields: Vec<(String, String)>,
        /// File parts.
        files: Vec<Attachment>,
    },
}

/// A single Data API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Path relative to the base URL, starting with `/`.
    pub path: String,
    /// HTTP method.
    pub method: Method,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// Optional body.
    pub body: Option<RequestBody>,
    /// Whether the bearer credential must be attached.
    pub requires_auth: bool,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            query: Vec::new(),
            body: None,
            requires_auth: true,
        }
    }

    /// Authenticated `GET` of `path`.
    ///
    /// # Example
    ///
    /// ```
    /// use wud_console::api::{ApiRequest, Method};
    ///
    /// let request = ApiRequest::get("/orders").with_query(vec![("page".into(), "2".into())]);
    /// assert_eq!(request.method, Method::Get);
    /// assert_eq!(request.query_value("page"), Some("2"));
    /// assert!(request.requires_auth);
    /// ```
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// Authenticated `POST` creating a record.
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    /// use wud_console::api::{ApiRequest, RequestBody};
    ///
    /// let request = ApiRequest::post("/categories", RequestBody::Json(json!({ "name": "Chairs" })));
    /// assert_eq!(request.body, Some(RequestBody::Json(json!({ "name": "Chairs" }))));
    /// ```
    #[must_use]
    pub fn post(path: impl Into<String>, body: RequestBody) -> Self {
        Self::new(Method::Post, path).with_body(body)
    }

    /// Authenticated `PUT` replacing a record's editable fields.
    #[must_use]
    pub fn put(path: impl Into<String>, body: RequestBody) -> Self {
        Self::new(Method::Put, path).with_body(body)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Replaces the query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets whether the bearer credential is required.
    #[must_use]
    pub const fn authenticated(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    /// Returns the value of a query parameter.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

//! HTTP implementation of the Data API.
//!
//! [`HttpDataApi`] issues requests against a fixed base URL with `reqwest`,
//! attaching the bearer credential when required and available. Response
//! interpretation is split into [`interpret_response`], a pure function, so
//! the JSON/text fallback and error shaping can be tested without a server.

use crate::api::client::DataApi;
use crate::api::request::{ApiRequest, Method, RequestBody};
use crate::domain::ApiError;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("wud-console/", env!("CARGO_PKG_VERSION"));

/// `reqwest`-backed Data API client.
#[derive(Debug, Clone)]
pub struct HttpDataApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpDataApi {
    /// Creates a client for the given base URL (e.g. `http://localhost:5000/api`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying HTTP client cannot be
    /// built (e.g. TLS backend initialisation failure).
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Returns the absolute URL for an API path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    fn build(&self, request: ApiRequest) -> Result<reqwest::RequestBuilder, ApiError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, self.url_for(&request.path));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if request.requires_auth {
            match &self.token {
                Some(token) => builder = builder.bearer_auth(token),
                None => tracing::debug!(path = %request.path, "no credential available for authenticated request"),
            }
        }

        match request.body {
            Some(RequestBody::Json(body)) => builder = builder.json(&body),
            Some(RequestBody::Multipart { fields, files }) => {
                let mut form = Form::new();
                for (name, value) in fields {
                    form = form.text(name, value);
                }
                for file in files {
                    let part = Part::bytes(file.bytes)
                        .file_name(file.file_name)
                        .mime_str(&file.content_type)
                        .map_err(|e| ApiError::Network(format!("invalid attachment type: {e}")))?;
                    form = form.part(file.field, part);
                }
                builder = builder.multipart(form);
            }
            None => {}
        }

        Ok(builder)
    }

    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let method = request.method;
        let path = request.path.clone();

        let response = self
            .build(request)?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        tracing::debug!(
            method = method.as_str(),
            path = %path,
            status = status,
            body_len = body.len(),
            "data api response"
        );

        interpret_response(status, content_type.as_deref(), &body)
    }
}

impl DataApi for HttpDataApi {
    fn request(&self, request: ApiRequest) -> BoxFuture<'_, Result<Value, ApiError>> {
        self.execute(request).boxed()
    }
}

/// Turns a raw HTTP response into parsed data or an [`ApiError`].
///
/// - JSON content types are parsed; anything else (or JSON that fails to
///   parse on an error response) is wrapped as `{"message": <text>}`.
/// - An empty body parses as `{}`.
/// - Non-2xx statuses yield [`ApiError::Status`] whose `message` is the
///   body's `message` field or the canonical status reason.
///
/// # Errors
///
/// [`ApiError::Status`] for non-2xx responses, [`ApiError::Decode`] for a 2xx
/// response declared as JSON whose body is malformed.
pub fn interpret_response(
    status: u16,
    content_type: Option<&str>,
    body: &str,
) -> Result<Value, ApiError> {
    let success = (200..300).contains(&status);
    let is_json = content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));

    let data = if body.trim().is_empty() {
        json!({})
    } else if is_json {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => value,
            Err(e) if success => return Err(ApiError::Decode(e.to_string())),
            Err(_) => json!({ "message": body }),
        }
    } else {
        json!({ "message": body })
    };

    if success {
        return Ok(data);
    }

    let message = data
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
        .or_else(|| {
            StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Request failed with status {status}"));

    Err(ApiError::Status {
        status,
        message,
        data,
    })
}

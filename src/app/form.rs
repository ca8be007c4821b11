//! Create and update submissions.
//!
//! A [`FormSubmission`] is what the edit form hands to the dispatcher. It is
//! validated against the listing's required fields before any request is
//! built; a failed validation never reaches the network.

use crate::api::{Attachment, RequestBody};
use crate::domain::{ConsoleError, Record, ResourceKind, Result};
use serde_json::{Map, Value};

/// Edit form contents.
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    /// Record being edited; `None` when creating.
    pub record: Option<Record>,
}

impl EditForm {
    #[must_use]
    pub const fn blank() -> Self {
        Self { record: None }
    }

    /// Form populated from a fully fetched record.
    #[must_use]
    pub const fn editing(record: Record) -> Self {
        Self {
            record: Some(record),
        }
    }

    #[must_use]
    pub fn title(&self, resource: ResourceKind) -> String {
        match &self.record {
            Some(record) => format!(
                "Edit {}",
                record.first_display(&[resource.columns()[0].field, "name", "title"])
            ),
            None => format!("New {}", resource.label()),
        }
    }
}

/// A create or update request assembled from the edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSubmission {
    /// Target record id; `None` creates a new record.
    pub id: Option<String>,
    /// Field values.
    pub fields: Map<String, Value>,
    /// Files to upload; forces a multipart body.
    pub attachments: Vec<Attachment>,
}

impl FormSubmission {
    #[must_use]
    pub fn create(fields: Map<String, Value>) -> Self {
        Self {
            id: None,
            fields,
            attachments: Vec::new(),
        }
    }

    #[must_use]
    pub fn update(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: Some(id.into()),
            fields,
            attachments: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Checks the listing's required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConsoleError::Validation`] naming every missing field.
    pub fn validate(&self, resource: ResourceKind) -> Result<()> {
        let missing: Vec<&str> = resource
            .required_fields()
            .iter()
            .copied()
            .filter(|field| !is_filled(self.fields.get(*field)))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConsoleError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )))
        }
    }

    /// Builds the request body: JSON, or multipart when files are attached.
    #[must_use]
    pub fn into_body(self) -> RequestBody {
        if self.attachments.is_empty() {
            return RequestBody::Json(Value::Object(self.fields));
        }

        let fields = self
            .fields
            .into_iter()
            .filter(|(_, value)| !value.is_null())
            .map(|(name, value)| {
                let text = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (name, text)
            })
            .collect();

        RequestBody::Multipart {
            fields,
            files: self.attachments,
        }
    }
}

fn is_filled(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn reports_every_missing_field() {
        let submission = FormSubmission::create(fields(json!({ "name": "Oak stool", "price": "" })));
        let err = submission.validate(ResourceKind::Products).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation failed: Missing required fields: price, category"
        );
    }

    #[test]
    fn zero_is_a_filled_value() {
        let submission = FormSubmission::update(
            "p1",
            fields(json!({ "name": "Oak stool", "price": 0, "category": "c1" })),
        );
        assert!(submission.validate(ResourceKind::Products).is_ok());
    }

    #[test]
    fn attachments_switch_to_multipart() {
        let submission = FormSubmission::create(fields(json!({
            "name": "Bench",
            "price": 120,
            "featured": true,
            "notes": null
        })))
        .with_attachment(Attachment {
            field: "images".into(),
            file_name: "bench.jpg".into(),
            content_type: "image/jpeg".into(),
            bytes: vec![0xff, 0xd8],
        });

        match submission.into_body() {
            RequestBody::Multipart { fields, files } => {
                assert!(fields.contains(&("price".to_string(), "120".to_string())));
                assert!(fields.contains(&("featured".to_string(), "true".to_string())));
                assert!(fields.contains(&("name".to_string(), "Bench".to_string())));
                assert!(fields.iter().all(|(k, _)| k != "notes"));
                assert_eq!(files.len(), 1);
            }
            other => panic!("expected multipart, got {other:?}"),
        }
    }

    #[test]
    fn plain_submissions_are_json() {
        let body = FormSubmission::create(fields(json!({ "name": "Chairs" }))).into_body();
        assert_eq!(body, RequestBody::Json(json!({ "name": "Chairs" })));
    }
}

//! Resource records as returned by the Data API.
//!
//! The console never owns a schema for products, orders and the rest; it
//! keeps each record as a JSON object and reads fields by name for display
//! and form population. List endpoints may return summarized records, so
//! edit flows always re-fetch the full record by id.

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

/// A single resource record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Record identifier (`_id` or `id`), empty if the server sent neither.
    pub id: String,

    /// All fields as sent by the server.
    pub fields: Map<String, Value>,
}

impl Record {
    /// Builds a record from a JSON value.
    ///
    /// Returns `None` if the value is not an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(fields) = value else {
            return None;
        };

        let id = ["_id", "id"]
            .iter()
            .find_map(|key| match fields.get(*key) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            })
            .unwrap_or_default();

        Some(Self { id, fields })
    }

    /// Returns a field's raw value.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a boolean field, treating anything else as `false`.
    #[must_use]
    pub fn flag(&self, field: &str) -> bool {
        self.fields.get(field).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Formats a field for display in a table cell.
    ///
    /// - strings: as-is, except RFC 3339 timestamps render as `YYYY-MM-DD`
    /// - numbers and booleans: their JSON text
    /// - objects: their `name` or `title` field (populated references)
    /// - arrays: `"<n> items"`
    /// - missing or null: empty string
    #[must_use]
    pub fn display(&self, field: &str) -> String {
        self.fields.get(field).map_or_else(String::new, display_value)
    }

    /// Returns the first non-empty value among the given fields.
    #[must_use]
    pub fn first_display(&self, fields: &[&str]) -> String {
        fields
            .iter()
            .map(|f| self.display(f))
            .find(|s| !s.is_empty())
            .unwrap_or_default()
    }

    /// Server-side wishlist state of a storefront product.
    #[must_use]
    pub fn is_wishlisted(&self) -> bool {
        ["isWishlisted", "inWishlist", "wishlisted"]
            .iter()
            .any(|field| self.flag(field))
    }

    /// Returns `true` if the field is present and not blank.
    #[must_use]
    pub fn has_value(&self, field: &str) -> bool {
        match self.fields.get(field) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Array(a)) => !a.is_empty(),
            Some(_) => true,
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => format_date(s).unwrap_or_else(|| s.clone()),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => match items.len() {
            1 => "1 item".to_string(),
            n => format!("{n} items"),
        },
        Value::Object(obj) => obj
            .get("name")
            .or_else(|| obj.get("title"))
            .map_or_else(String::new, display_value),
    }
}

/// Renders an RFC 3339 timestamp as a calendar date.
///
/// Uses the timestamp's own offset; the local clock and zone are never read.
fn format_date(s: &str) -> Option<String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.date_naive().format("%Y-%m-%d").to_string());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_mongo_and_numeric_ids() {
        let mongo = Record::from_value(json!({ "_id": "64f1", "name": "Oak table" })).unwrap();
        assert_eq!(mongo.id, "64f1");

        let numeric = Record::from_value(json!({ "id": 42 })).unwrap();
        assert_eq!(numeric.id, "42");

        let anonymous = Record::from_value(json!({ "name": "Stool" })).unwrap();
        assert_eq!(anonymous.id, "");

        assert!(Record::from_value(json!(["not", "an", "object"])).is_none());
    }

    #[test]
    fn display_formats_cells() {
        let record = Record::from_value(json!({
            "_id": "1",
            "name": "Walnut chair",
            "price": 249.5,
            "inStock": true,
            "createdAt": "2026-03-14T09:26:53.589Z",
            "category": { "_id": "c1", "name": "Chairs" },
            "images": ["a.jpg", "b.jpg"],
            "notes": null
        }))
        .unwrap();

        assert_eq!(record.display("name"), "Walnut chair");
        assert_eq!(record.display("price"), "249.5");
        assert_eq!(record.display("inStock"), "true");
        assert_eq!(record.display("createdAt"), "2026-03-14");
        assert_eq!(record.display("category"), "Chairs");
        assert_eq!(record.display("images"), "2 items");
        assert_eq!(record.display("notes"), "");
        assert_eq!(record.display("missing"), "");
    }

    #[test]
    fn has_value_treats_blank_as_missing() {
        let record = Record::from_value(json!({
            "name": "  ",
            "price": 0,
            "tags": [],
            "category": "c1"
        }))
        .unwrap();

        assert!(!record.has_value("name"));
        assert!(record.has_value("price"));
        assert!(!record.has_value("tags"));
        assert!(record.has_value("category"));
        assert!(!record.has_value("status"));
    }
}

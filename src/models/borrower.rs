//! Borrower model and capability implementations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::environment::Service;
use crate::traits::{Create, Delete, Patch, Query, Resource, Retrieve};

/// A borrower record.
///
/// Borrowers are the root entity of the borrower service; fields,
/// authorizations, documents, and other satellite resources hang off a
/// borrower id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Borrower {
    pub id: String,

    /// Kind of borrower (e.g. `"person"`, `"business"`).
    pub persona: String,

    /// Human-readable label.
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Form the borrower signed up through, if any.
    #[serde(default)]
    pub form_id: Option<String>,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a borrower.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBorrower {
    pub persona: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Payload for updating a borrower.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBorrower {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Filter parameters for querying borrowers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BorrowerFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Resource for Borrower {
    const SERVICE: Service = Service::Borrower;
    const PATH: &'static str = "v1/borrowers";
}

impl Retrieve for Borrower {}

impl Create for Borrower {
    type Input = CreateBorrower;
}

impl Patch for Borrower {
    type Input = UpdateBorrower;
}

impl Delete for Borrower {}

impl Query for Borrower {
    type Filter = BorrowerFilter;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_format() {
        let borrower: Borrower = serde_json::from_value(serde_json::json!({
            "id": "b-123",
            "persona": "person",
            "label": "Ada Lovelace",
            "tags": ["vip"],
            "formId": "f-9",
            "createdAt": "2024-03-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(borrower.id, "b-123");
        assert_eq!(borrower.form_id.as_deref(), Some("f-9"));
        assert_eq!(borrower.updated_at, None);
    }

    #[test]
    fn create_payload_uses_camel_case() {
        let payload = CreateBorrower {
            persona: "business".to_string(),
            label: None,
            tags: vec![],
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, serde_json::json!({"persona": "business"}));
    }
}

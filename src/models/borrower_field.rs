//! Borrower field model: typed key/value facts attached to a borrower.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::environment::Service;
use crate::traits::{Create, Delete, Patch, Query, Resource, Retrieve};

/// A single typed fact about a borrower (income, address score, ...).
///
/// The borrower service uses upper-case `ID` keys on this entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowerField {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "borrowerID")]
    pub borrower_id: String,

    pub key: String,

    pub label: String,

    /// Current value; the declared `data_type` tells consumers how to
    /// interpret it.
    pub value: serde_json::Value,

    #[serde(rename = "dataType")]
    pub data_type: String,

    /// Prior values, most recent first.
    #[serde(default)]
    pub history: Vec<serde_json::Value>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a borrower field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateBorrowerField {
    #[serde(rename = "borrowerID")]
    pub borrower_id: String,

    #[serde(rename = "formID", skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,

    #[serde(rename = "referenceID", skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,

    pub key: String,

    pub value: String,

    #[serde(rename = "dataType")]
    pub data_type: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Payload for updating a borrower field.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateBorrowerField {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(rename = "dataType", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Filter parameters for querying borrower fields.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BorrowerFieldFilter {
    #[serde(rename = "borrower-id", skip_serializing_if = "Option::is_none")]
    pub borrower_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Resource for BorrowerField {
    const SERVICE: Service = Service::Borrower;
    const PATH: &'static str = "v1/borrower-fields";
    const ID_FIELD: &'static str = "ID";
}

impl Retrieve for BorrowerField {}

impl Create for BorrowerField {
    type Input = CreateBorrowerField;
}

impl Patch for BorrowerField {
    type Input = UpdateBorrowerField;
}

impl Delete for BorrowerField {}

impl Query for BorrowerField {
    type Filter = BorrowerFieldFilter;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_upper_case_id_keys() {
        let field: BorrowerField = serde_json::from_value(serde_json::json!({
            "ID": "bf-1",
            "borrowerID": "b-123",
            "key": "monthly-income",
            "label": "Monthly income",
            "value": 4200,
            "dataType": "number",
            "history": [],
            "createdAt": "2024-03-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(field.id, "bf-1");
        assert_eq!(field.borrower_id, "b-123");
        assert_eq!(field.value, serde_json::json!(4200));
    }
}

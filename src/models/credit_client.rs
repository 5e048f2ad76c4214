//! Credit client model (credit-management service).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::environment::Service;
use crate::traits::{Create, Query, Resource, Retrieve};

/// A client of the credit-management service.
///
/// The retrieve endpoint accepts the client id, the tax id, or an
/// external id as the identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditClient {
    #[serde(rename = "clientId")]
    pub id: String,

    pub partner_id: String,

    pub status: String,

    pub external_id: String,

    pub tax_id: String,

    pub email_address: String,

    /// "Doing business as" name.
    pub dba: String,

    pub legal_name: String,

    pub address: String,

    #[serde(default)]
    pub phone_number: Option<String>,

    pub created_at: DateTime<Utc>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating a credit client.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCreditClient {
    pub partner_id: String,
    pub external_id: String,
    pub legal_name: String,
    pub tax_id: String,
    pub dba: String,
    pub address: String,
    pub email_address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// `YYYY-MM-DD`; defaults to the service's notion of today.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation_date: Option<String>,
}

/// Filter parameters for querying credit clients.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreditClientFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(rename = "partner-id", skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<String>,
}

impl Resource for CreditClient {
    const SERVICE: Service = Service::CreditManagement;
    const PATH: &'static str = "v2/clients";
    const ID_FIELD: &'static str = "clientId";
}

impl Retrieve for CreditClient {}

impl Create for CreditClient {
    type Input = CreateCreditClient;
}

impl Query for CreditClient {
    type Filter = CreditClientFilter;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_format() {
        let client: CreditClient = serde_json::from_value(serde_json::json!({
            "clientId": "c-1",
            "partnerId": "p-1",
            "status": "active",
            "externalId": "ext-9",
            "taxId": "900-12-3456",
            "emailAddress": "ops@example.com",
            "dba": "Example Co",
            "legalName": "Example Company LLC",
            "address": "1 Main St",
            "createdAt": "2024-03-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(client.id, "c-1");
        assert_eq!(client.phone_number, None);
    }
}

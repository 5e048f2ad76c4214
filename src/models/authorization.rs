//! Authorization model: consent records captured from borrowers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::environment::Service;
use crate::traits::{Create, Delete, Query, Resource, Retrieve};

/// A consent record tied to an identity (e.g. data-processing consent
/// captured against a tax id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Authorization {
    #[serde(rename = "ID")]
    pub id: String,

    pub tenant: String,

    #[serde(rename = "formID", default)]
    pub form_id: Option<String>,

    /// What was authorized (e.g. `"bureau-pull"`).
    pub key: String,

    pub label: String,

    #[serde(rename = "identityKey")]
    pub identity_key: String,

    #[serde(rename = "identityValue")]
    pub identity_value: String,

    #[serde(rename = "borrowerID", default)]
    pub borrower_id: Option<String>,

    #[serde(rename = "expiresAt", default)]
    pub expires_at: Option<DateTime<Utc>>,

    #[serde(rename = "ipAddress", default)]
    pub ip_address: Option<String>,

    #[serde(rename = "policyLink", default)]
    pub policy_link: Option<String>,

    #[serde(rename = "externalID", default)]
    pub external_id: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(rename = "authorizedAt", default)]
    pub authorized_at: Option<DateTime<Utc>>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Authorization {
    /// Whether the consent is still valid at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.authorized_at.is_some() && self.expires_at.map_or(true, |expiry| expiry > now)
    }
}

/// Payload for creating an authorization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateAuthorization {
    #[serde(rename = "borrowerID", skip_serializing_if = "Option::is_none")]
    pub borrower_id: Option<String>,

    #[serde(rename = "formID", skip_serializing_if = "Option::is_none")]
    pub form_id: Option<String>,

    #[serde(rename = "ipAddress", skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,

    pub key: String,

    #[serde(rename = "policyLink", skip_serializing_if = "Option::is_none")]
    pub policy_link: Option<String>,

    #[serde(rename = "externalID", skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    #[serde(rename = "identityKey")]
    pub identity_key: String,

    #[serde(rename = "identityValue")]
    pub identity_value: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Filter parameters for querying authorizations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthorizationFilter {
    #[serde(rename = "borrower-id", skip_serializing_if = "Option::is_none")]
    pub borrower_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl Resource for Authorization {
    const SERVICE: Service = Service::Borrower;
    const PATH: &'static str = "v1/authorizations";
    const ID_FIELD: &'static str = "ID";
}

impl Retrieve for Authorization {}

impl Create for Authorization {
    type Input = CreateAuthorization;
}

impl Delete for Authorization {}

impl Query for Authorization {
    type Filter = AuthorizationFilter;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(authorized: bool, expires: Option<&str>) -> Authorization {
        serde_json::from_value(serde_json::json!({
            "ID": "auth-1",
            "tenant": "acme",
            "key": "bureau-pull",
            "label": "Credit bureau pull",
            "identityKey": "tax-id",
            "identityValue": "900-12-3456",
            "authorizedAt": if authorized { Some("2024-01-01T00:00:00Z") } else { None },
            "expiresAt": expires,
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn active_when_authorized_and_unexpired() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        assert!(sample(true, None).is_active(now));
        assert!(sample(true, Some("2025-01-01T00:00:00Z")).is_active(now));
        assert!(!sample(true, Some("2024-02-01T00:00:00Z")).is_active(now));
        assert!(!sample(false, None).is_active(now));
    }
}

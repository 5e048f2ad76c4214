//! Alternative-data request model.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::blocking;
use crate::client::LendClient;
use crate::environment::Service;
use crate::error::{LendError, Result};
use crate::traits::{Resource, Retrieve};

/// Which source and version to pull from the alternative-data service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConfig {
    pub source_id: String,
    pub version: String,
}

/// The result of one source within a data request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceOutput {
    pub source_id: String,
    pub version: String,
    /// Source payload; `None` while the source is still running or when
    /// it failed.
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// A lookup submitted to the alternative-data service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataRequest {
    pub request_id: String,
    pub status: String,
    #[serde(default)]
    pub outputs: Vec<SourceOutput>,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitBody<'a> {
    input_keys: &'a HashMap<String, serde_json::Value>,
    sources_config: &'a [SourceConfig],
}

impl DataRequest {
    /// Submit a lookup and return its current state.
    ///
    /// The request runs server-side; poll with
    /// [`Retrieve::retrieve`](crate::Retrieve::retrieve) until `status`
    /// reaches a terminal value.
    pub async fn submit(
        client: &LendClient,
        input_keys: &HashMap<String, serde_json::Value>,
        sources: &[SourceConfig],
    ) -> Result<DataRequest> {
        let body = SubmitBody {
            input_keys,
            sources_config: sources,
        };
        client
            .with_renewal(|| async {
                let response = client.post(Self::SERVICE, Self::PATH, &body).await?;
                response.json::<DataRequest>().await.map_err(LendError::Http)
            })
            .await
    }

    /// Blocking mirror of [`submit`](Self::submit).
    pub fn submit_blocking(
        client: &blocking::LendClient,
        input_keys: &HashMap<String, serde_json::Value>,
        sources: &[SourceConfig],
    ) -> Result<DataRequest> {
        let body = SubmitBody {
            input_keys,
            sources_config: sources,
        };
        client.with_renewal(|| {
            let response = client.post(Self::SERVICE, Self::PATH, &body)?;
            response.json::<DataRequest>().map_err(LendError::Http)
        })
    }
}

impl Resource for DataRequest {
    const SERVICE: Service = Service::AltData;
    const PATH: &'static str = "v1/requests";
    const ID_FIELD: &'static str = "requestId";
}

impl Retrieve for DataRequest {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_body_wire_format() {
        let mut input_keys = HashMap::new();
        input_keys.insert("personId".to_string(), serde_json::json!("1234567890"));
        let sources = vec![SourceConfig {
            source_id: "TES-GEN-0000".to_string(),
            version: "v1".to_string(),
        }];

        let value = serde_json::to_value(SubmitBody {
            input_keys: &input_keys,
            sources_config: &sources,
        })
        .unwrap();

        assert_eq!(value["inputKeys"]["personId"], "1234567890");
        assert_eq!(value["sourcesConfig"][0]["sourceId"], "TES-GEN-0000");
    }
}

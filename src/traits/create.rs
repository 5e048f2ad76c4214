//! Create capability: add a new entity to a collection.

use async_trait::async_trait;
use serde::Serialize;

use crate::blocking;
use crate::client::LendClient;
use crate::error::{LendError, Result};
use crate::traits::Resource;

/// Create a new entity, returning the id the service assigned.
#[async_trait]
pub trait Create: Resource {
    /// Payload accepted by the create endpoint.
    type Input: Serialize + Send + Sync;

    /// Create the entity and return its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the payload, including a
    /// 409 `DuplicateError` when the entity already exists (see
    /// [`create_or_update`](Self::create_or_update)).
    async fn create(client: &LendClient, data: &Self::Input) -> Result<String> {
        client
            .with_renewal(|| async {
                let response = client.post(Self::SERVICE, Self::PATH, data).await?;
                let body: serde_json::Value = response.json().await.map_err(LendError::Http)?;
                created_id::<Self>(&body)
            })
            .await
    }

    /// Create the entity, or patch the existing one when the service
    /// reports a duplicate.
    ///
    /// On a 409 `DuplicateError` carrying a `duplicateId`, the same
    /// payload is re-sent as a patch to that id. Any other failure
    /// propagates.
    async fn create_or_update(client: &LendClient, data: &Self::Input) -> Result<String> {
        match Self::create(client, data).await {
            Err(err) => {
                let Some(id) = err.duplicate_id().map(str::to_owned) else {
                    return Err(err);
                };
                let path = Self::member_path(&id);
                client
                    .with_renewal(|| async {
                        client.patch(Self::SERVICE, &path, data).await.map(|_| ())
                    })
                    .await?;
                Ok(id)
            }
            ok => ok,
        }
    }

    /// Blocking mirror of [`create`](Self::create).
    fn create_blocking(client: &blocking::LendClient, data: &Self::Input) -> Result<String> {
        client.with_renewal(|| {
            let response = client.post(Self::SERVICE, Self::PATH, data)?;
            let body: serde_json::Value = response.json().map_err(LendError::Http)?;
            created_id::<Self>(&body)
        })
    }

    /// Blocking mirror of [`create_or_update`](Self::create_or_update).
    fn create_or_update_blocking(
        client: &blocking::LendClient,
        data: &Self::Input,
    ) -> Result<String> {
        match Self::create_blocking(client, data) {
            Err(err) => {
                let Some(id) = err.duplicate_id().map(str::to_owned) else {
                    return Err(err);
                };
                let path = Self::member_path(&id);
                client.with_renewal(|| client.patch(Self::SERVICE, &path, data).map(|_| ()))?;
                Ok(id)
            }
            ok => ok,
        }
    }
}

/// Pull the assigned id out of a create response body.
fn created_id<R: Resource>(body: &serde_json::Value) -> Result<String> {
    body.get(R::ID_FIELD)
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .ok_or_else(|| {
            LendError::UnexpectedResponse(format!(
                "create response missing `{}` field",
                R::ID_FIELD
            ))
        })
}

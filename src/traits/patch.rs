//! Patch capability: partially update an existing entity.

use async_trait::async_trait;
use serde::Serialize;

use crate::blocking;
use crate::client::LendClient;
use crate::error::Result;
use crate::traits::Resource;

/// Partially update an existing entity.
#[async_trait]
pub trait Patch: Resource {
    /// Payload accepted by the patch endpoint.
    type Input: Serialize + Send + Sync;

    /// Apply the patch.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist or the service
    /// rejects the payload.
    async fn patch(client: &LendClient, id: &str, data: &Self::Input) -> Result<()> {
        let path = Self::member_path(id);
        client
            .with_renewal(|| async { client.patch(Self::SERVICE, &path, data).await.map(|_| ()) })
            .await
    }

    /// Blocking mirror of [`patch`](Self::patch).
    fn patch_blocking(client: &blocking::LendClient, id: &str, data: &Self::Input) -> Result<()> {
        let path = Self::member_path(id);
        client.with_renewal(|| client.patch(Self::SERVICE, &path, data).map(|_| ()))
    }
}

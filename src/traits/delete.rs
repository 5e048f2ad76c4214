//! Delete capability: remove an entity.

use async_trait::async_trait;

use crate::blocking;
use crate::client::LendClient;
use crate::error::Result;
use crate::traits::Resource;

/// Delete an entity by id.
#[async_trait]
pub trait Delete: Resource {
    /// Delete the entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity does not exist or cannot be
    /// deleted.
    async fn delete(client: &LendClient, id: &str) -> Result<()> {
        let path = Self::member_path(id);
        client
            .with_renewal(|| async { client.delete(Self::SERVICE, &path).await.map(|_| ()) })
            .await
    }

    /// Blocking mirror of [`delete`](Self::delete).
    fn delete_blocking(client: &blocking::LendClient, id: &str) -> Result<()> {
        let path = Self::member_path(id);
        client.with_renewal(|| client.delete(Self::SERVICE, &path).map(|_| ()))
    }
}

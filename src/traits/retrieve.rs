//! Retrieve capability: fetch a single entity by id.

use async_trait::async_trait;

use crate::blocking;
use crate::client::LendClient;
use crate::error::{LendError, Result};
use crate::traits::Resource;

/// Fetch a single entity by id.
///
/// A 404 from the service is treated as "no result" and maps to
/// `Ok(None)` rather than an error.
///
/// # Example
///
/// ```ignore
/// use lendapi::{Borrower, LendClient, Retrieve, Session};
///
/// let client = LendClient::new(Session::from_env()?)?;
/// let borrower = Borrower::retrieve(&client, "b-123").await?;
/// ```
#[async_trait]
pub trait Retrieve: Resource {
    /// Fetch the entity by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason other than
    /// the entity not existing.
    async fn retrieve(client: &LendClient, id: &str) -> Result<Option<Self>> {
        let path = Self::member_path(id);
        client
            .with_renewal(|| async {
                match client.get(Self::SERVICE, &path).await {
                    Ok(response) => {
                        let dto = response.json::<Self>().await.map_err(LendError::Http)?;
                        Ok(Some(dto))
                    }
                    Err(LendError::NotFound { .. }) => Ok(None),
                    Err(err) => Err(err),
                }
            })
            .await
    }

    /// Blocking mirror of [`retrieve`](Self::retrieve).
    fn retrieve_blocking(client: &blocking::LendClient, id: &str) -> Result<Option<Self>> {
        let path = Self::member_path(id);
        client.with_renewal(|| match client.get(Self::SERVICE, &path) {
            Ok(response) => {
                let dto = response.json::<Self>().map_err(LendError::Http)?;
                Ok(Some(dto))
            }
            Err(LendError::NotFound { .. }) => Ok(None),
            Err(err) => Err(err),
        })
    }
}

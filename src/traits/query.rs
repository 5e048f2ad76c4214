//! Query capability: filtered, paginated collection fetches.

use async_trait::async_trait;
use serde::Serialize;

use crate::blocking;
use crate::client::LendClient;
use crate::error::{LendError, Result};
use crate::pagination::{QueryParams, DEFAULT_PAGE_SIZE, MAX_PAGES};
use crate::traits::Resource;

/// Query a collection with entity-specific filters plus common
/// pagination parameters.
///
/// The services return plain JSON arrays; a page shorter than the
/// requested size marks the end of the collection.
#[async_trait]
pub trait Query: Resource {
    /// Entity-specific filter parameters (kebab-case on the wire).
    type Filter: Serialize + Default + Send + Sync;

    /// Fetch one page of results.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn query(
        client: &LendClient,
        filter: &Self::Filter,
        params: &QueryParams,
    ) -> Result<Vec<Self>> {
        let pairs = query_pairs(filter, params)?;
        client
            .with_renewal(|| async {
                let response = client
                    .get_with_query(Self::SERVICE, Self::PATH, &pairs)
                    .await?;
                response.json::<Vec<Self>>().await.map_err(LendError::Http)
            })
            .await
    }

    /// Fetch every page of results matching the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn query_all(client: &LendClient, filter: &Self::Filter) -> Result<Vec<Self>> {
        let mut all = Vec::new();
        let mut page = 1;

        loop {
            let params = QueryParams::for_page(page, DEFAULT_PAGE_SIZE);
            let batch = Self::query(client, filter, &params).await?;
            let fetched = batch.len();
            all.extend(batch);

            if fetched < DEFAULT_PAGE_SIZE as usize {
                break;
            }
            page += 1;

            // Safety limit to prevent infinite loops
            if page > MAX_PAGES {
                tracing::warn!("reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all)
    }

    /// Blocking mirror of [`query`](Self::query).
    fn query_blocking(
        client: &blocking::LendClient,
        filter: &Self::Filter,
        params: &QueryParams,
    ) -> Result<Vec<Self>> {
        let pairs = query_pairs(filter, params)?;
        client.with_renewal(|| {
            let response = client.get_with_query(Self::SERVICE, Self::PATH, &pairs)?;
            response.json::<Vec<Self>>().map_err(LendError::Http)
        })
    }

    /// Blocking mirror of [`query_all`](Self::query_all).
    fn query_all_blocking(
        client: &blocking::LendClient,
        filter: &Self::Filter,
    ) -> Result<Vec<Self>> {
        let mut all = Vec::new();
        let mut page = 1;

        loop {
            let params = QueryParams::for_page(page, DEFAULT_PAGE_SIZE);
            let batch = Self::query_blocking(client, filter, &params)?;
            let fetched = batch.len();
            all.extend(batch);

            if fetched < DEFAULT_PAGE_SIZE as usize {
                break;
            }
            page += 1;

            if page > MAX_PAGES {
                tracing::warn!("reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all)
    }
}

/// Flatten filter and pagination parameters into query-string pairs,
/// dropping unset values.
fn query_pairs<F: Serialize>(filter: &F, params: &QueryParams) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();
    append_pairs(&mut pairs, serde_json::to_value(filter)?)?;
    append_pairs(&mut pairs, serde_json::to_value(params)?)?;
    Ok(pairs)
}

fn append_pairs(pairs: &mut Vec<(String, String)>, value: serde_json::Value) -> Result<()> {
    let map = value.as_object().ok_or_else(|| {
        LendError::UnexpectedResponse("query filters must serialize to an object".to_string())
    })?;
    for (key, value) in map {
        let rendered = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        pairs.push((key.clone(), rendered));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Serialize)]
    struct Filter {
        #[serde(rename = "borrower-id", skip_serializing_if = "Option::is_none")]
        borrower_id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        key: Option<String>,
    }

    #[test]
    fn pairs_merge_filter_and_pagination() {
        let filter = Filter {
            borrower_id: Some("b-1".to_string()),
            key: None,
        };
        let params = QueryParams::for_page(2, 50);
        let pairs = query_pairs(&filter, &params).unwrap();

        assert!(pairs.contains(&("borrower-id".to_string(), "b-1".to_string())));
        assert!(pairs.contains(&("page".to_string(), "2".to_string())));
        assert!(pairs.contains(&("per-page".to_string(), "50".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "key"));
    }
}

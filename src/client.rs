//! Asynchronous Lendcore API client.
//!
//! Low-level HTTP transport plus the credential-renewal trigger. Entity
//! operations are implemented via the capability traits on model types.

use std::future::Future;
use std::sync::Arc;

use reqwest::{Client, Response};
use serde::Serialize;
use url::Url;

use crate::auth::{renewal, retry};
use crate::environment::Service;
use crate::error::{self, LendError, Result};
use crate::session::{Session, DEFAULT_TENANT};

pub(crate) const USER_AGENT: &str = concat!("lendapi/", env!("CARGO_PKG_VERSION"));

/// Asynchronous Lendcore API client.
///
/// Wraps a [`Session`] with an HTTP transport. Entity-specific
/// operations are implemented via the [`Retrieve`](crate::Retrieve),
/// [`Create`](crate::Create), [`Patch`](crate::Patch),
/// [`Delete`](crate::Delete), and [`Query`](crate::Query) traits on
/// model types.
///
/// This struct is cheaply cloneable; clones share the session (and thus
/// the credential store) and the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use lendapi::{LendClient, Session};
///
/// # fn example() -> lendapi::Result<()> {
/// let client = LendClient::new(Session::from_env()?)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LendClient {
    http: Client,
    session: Arc<Session>,
}

impl std::fmt::Debug for LendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LendClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl LendClient {
    /// Create a client for a configured session.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be constructed.
    pub fn new(session: Session) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(session.request_timeout())
            .build()
            .map_err(LendError::Http)?;

        Ok(Self {
            http,
            session: Arc::new(session),
        })
    }

    /// The session this client operates on.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, service: Service, path: &str) -> Result<Url> {
        join_base(self.session.service_base_url(service), path)
    }

    /// Make a GET request.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, service: Service, path: &str) -> Result<Response> {
        let response = self
            .http
            .get(self.url(service, path)?)
            .headers(self.session.store().auth_headers()?)
            .send()
            .await
            .map_err(LendError::Http)?;

        Self::check_response(response).await
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        service: Service,
        path: &str,
        query: &Q,
    ) -> Result<Response> {
        let response = self
            .http
            .get(self.url(service, path)?)
            .headers(self.session.store().auth_headers()?)
            .query(query)
            .send()
            .await
            .map_err(LendError::Http)?;

        Self::check_response(response).await
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        service: Service,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        let response = self
            .http
            .post(self.url(service, path)?)
            .headers(self.session.store().auth_headers()?)
            .json(body)
            .send()
            .await
            .map_err(LendError::Http)?;

        Self::check_response(response).await
    }

    /// Make a PATCH request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        service: Service,
        path: &str,
        body: &B,
    ) -> Result<Response> {
        let response = self
            .http
            .patch(self.url(service, path)?)
            .headers(self.session.store().auth_headers()?)
            .json(body)
            .send()
            .await
            .map_err(LendError::Http)?;

        Self::check_response(response).await
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, service: Service, path: &str) -> Result<Response> {
        let response = self
            .http
            .delete(self.url(service, path)?)
            .headers(self.session.store().auth_headers()?)
            .send()
            .await
            .map_err(LendError::Http)?;

        Self::check_response(response).await
    }

    /// Renew the session's access credential against the identity
    /// provider and install the outcome in the credential store.
    ///
    /// Called transparently by [`with_renewal`](Self::with_renewal) when
    /// a call fails with HTTP 401; also usable directly for eager
    /// authentication of a client-credentials or password session.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for sessions with nothing to renew
    /// with (API keys, refresh-less user tokens), and a renewal error if
    /// the identity provider rejects the request. Renewal itself is
    /// never retried.
    #[tracing::instrument(skip(self))]
    pub async fn renew_credentials(&self) -> Result<()> {
        let plan = renewal::plan_renewal(self.session.login(), self.session.store().refresh_token())?;
        tracing::debug!(grant = plan.path, "renewing access credential");

        let url = join_base(self.session.auth_base_url(), plan.path)?;
        let mut request = self.http.post(url).form(&plan.form);
        if self.session.tenant() != DEFAULT_TENANT {
            request = request.header(renewal::TENANT_HEADER, self.session.tenant());
        }

        let response = request.send().await.map_err(LendError::Http)?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_else(|_| String::new());
            return Err(LendError::Renewal {
                status: status.as_u16(),
                message,
            });
        }

        let grant: renewal::TokenGrant = response.json().await.map_err(LendError::Http)?;
        self.session
            .store()
            .set_credentials(grant.access_token, grant.refresh_token);
        Ok(())
    }

    /// Run a remote call with transparent credential renewal.
    ///
    /// If `f` fails with HTTP 401 the session's credential is renewed and
    /// `f` is invoked exactly once more; its second outcome is final. The
    /// replay re-reads the credential store, so it carries the fresh
    /// token.
    ///
    /// The replay is the exact same request and is not deduplicated: a
    /// non-idempotent create whose first attempt actually succeeded
    /// remotely but surfaced as an authorization failure will run twice.
    /// Endpoints invoked under this wrapper should be idempotent (e.g.
    /// via server-side idempotency keys).
    pub async fn with_renewal<T, F, Fut>(&self, f: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        retry::retry_once_on_expired(f, || self.renew_credentials()).await
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_else(|_| String::new());
        Err(error::status_error(status.as_u16(), &path, &body))
    }
}

/// Join a base URL and a relative path, tolerating bases with or without
/// a trailing slash.
pub(crate) fn join_base(base: &str, path: &str) -> Result<Url> {
    let normalized = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };
    Ok(Url::parse(&normalized)?.join(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;

    #[test]
    fn debug_output_hides_credentials() {
        let session = Session::with_api_key(Environment::Production, "acme", "k-secret");
        let client = LendClient::new(session).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("LendClient"));
        assert!(!debug.contains("k-secret"));
    }

    #[test]
    fn urls_join_service_base_and_path() {
        let session = Session::with_api_key(Environment::Production, "acme", "k");
        let client = LendClient::new(session).unwrap();
        let url = client.url(Service::Borrower, "v1/borrowers/b-1").unwrap();
        assert_eq!(url.as_str(), "https://borrowers.lendcore.io/v1/borrowers/b-1");
    }

    #[test]
    fn base_url_trailing_slash_is_tolerated() {
        let with = join_base("http://localhost:4001/", "v1/debts").unwrap();
        let without = join_base("http://localhost:4001", "v1/debts").unwrap();
        assert_eq!(with, without);
    }
}

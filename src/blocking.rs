//! Blocking Lendcore API client.
//!
//! Mirror of the async [`LendClient`](crate::LendClient) for callers
//! without an async runtime. Every operation blocks the calling thread
//! until the HTTP response arrives; retry and renewal semantics are
//! identical to the async convention.
//!
//! Do not use this client from inside an async runtime.

use std::sync::Arc;

use reqwest::blocking::{Client, Response};
use serde::Serialize;
use url::Url;

use crate::auth::{renewal, retry};
use crate::client::{join_base, USER_AGENT};
use crate::environment::Service;
use crate::error::{self, LendError, Result};
use crate::session::{Session, DEFAULT_TENANT};

/// Blocking Lendcore API client.
///
/// # Example
///
/// ```no_run
/// use lendapi::{blocking, Session};
///
/// # fn example() -> lendapi::Result<()> {
/// let client = blocking::LendClient::new(Session::from_env()?)?;
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
        f.debug_struct("blocking::LendClient")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl LendClient {
    /// Create a blocking client for a configured session.
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
    pub fn get(&self, service: Service, path: &str) -> Result<Response> {
        let response = self
            .http
            .get(self.url(service, path)?)
            .headers(self.session.store().auth_headers()?)
            .send()
            .map_err(LendError::Http)?;

        Self::check_response(response)
    }

    /// Make a GET request with query parameters.
    #[tracing::instrument(skip(self, query))]
    pub fn get_with_query<Q: Serialize + ?Sized>(
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
            .map_err(LendError::Http)?;

        Self::check_response(response)
    }

    /// Make a POST request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub fn post<B: Serialize + ?Sized>(
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
            .map_err(LendError::Http)?;

        Self::check_response(response)
    }

    /// Make a PATCH request with JSON body.
    #[tracing::instrument(skip(self, body))]
    pub fn patch<B: Serialize + ?Sized>(
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
            .map_err(LendError::Http)?;

        Self::check_response(response)
    }

    /// Make a DELETE request.
    #[tracing::instrument(skip(self))]
    pub fn delete(&self, service: Service, path: &str) -> Result<Response> {
        let response = self
            .http
            .delete(self.url(service, path)?)
            .headers(self.session.store().auth_headers()?)
            .send()
            .map_err(LendError::Http)?;

        Self::check_response(response)
    }

    /// Renew the session's access credential against the identity
    /// provider and install the outcome in the credential store.
    ///
    /// See [`LendClient::renew_credentials`](crate::LendClient::renew_credentials);
    /// semantics are identical.
    #[tracing::instrument(skip(self))]
    pub fn renew_credentials(&self) -> Result<()> {
        let plan = renewal::plan_renewal(self.session.login(), self.session.store().refresh_token())?;
        tracing::debug!(grant = plan.path, "renewing access credential");

        let url = join_base(self.session.auth_base_url(), plan.path)?;
        let mut request = self.http.post(url).form(&plan.form);
        if self.session.tenant() != DEFAULT_TENANT {
            request = request.header(renewal::TENANT_HEADER, self.session.tenant());
        }

        let response = request.send().map_err(LendError::Http)?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| String::new());
            return Err(LendError::Renewal {
                status: status.as_u16(),
                message,
            });
        }

        let grant: renewal::TokenGrant = response.json().map_err(LendError::Http)?;
        self.session
            .store()
            .set_credentials(grant.access_token, grant.refresh_token);
        Ok(())
    }

    /// Run a remote call with transparent credential renewal.
    ///
    /// Blocking mirror of
    /// [`LendClient::with_renewal`](crate::LendClient::with_renewal);
    /// the same single-replay contract and idempotence caveat apply.
    pub fn with_renewal<T, F>(&self, f: F) -> Result<T>
    where
        F: Fn() -> Result<T>,
    {
        retry::retry_once_on_expired_blocking(f, || self.renew_credentials())
    }

    /// Check response status and convert errors.
    fn check_response(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        let body = response.text().unwrap_or_else(|_| String::new());
        Err(error::status_error(status.as_u16(), &path, &body))
    }
}

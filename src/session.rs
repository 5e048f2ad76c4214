//! Client sessions: one configured connection to the remote services.

use std::env;
use std::path::Path;
use std::time::Duration;

use crate::auth::{Credential, CredentialStore, LoginMethod};
use crate::config::CredentialsFile;
use crate::environment::{Environment, Service};
use crate::error::{LendError, Result};

/// Tenant used when none is configured explicitly.
pub const DEFAULT_TENANT: &str = "default";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// One configured connection to the remote services.
///
/// A session carries the deployment environment, the tenant, and exactly
/// one credential configuration. It is created once and handed to either
/// the async [`LendClient`](crate::LendClient) or the
/// [`blocking::LendClient`](crate::blocking::LendClient); the stored
/// credential is replaced in place whenever a renewal succeeds.
///
/// # Example
///
/// ```no_run
/// use lendapi::{Environment, Session};
///
/// let session = Session::with_client_credentials(
///     Environment::Production,
///     "acme",
///     "client-id",
///     "client-secret",
/// );
/// ```
pub struct Session {
    environment: Environment,
    tenant: String,
    timeout: Duration,
    login: LoginMethod,
    store: CredentialStore,
    url_overrides: UrlOverrides,
}

/// Per-session base-URL overrides, for self-hosted deployments and
/// tests. Unset entries fall back to the environment's fixed tables.
#[derive(Default)]
struct UrlOverrides {
    auth: Option<String>,
    borrower: Option<String>,
    cms: Option<String>,
    altdata: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("environment", &self.environment)
            .field("tenant", &self.tenant)
            .finish_non_exhaustive()
    }
}

impl Session {
    fn new(
        environment: Environment,
        tenant: impl Into<String>,
        login: LoginMethod,
        initial: Credential,
    ) -> Self {
        Self {
            environment,
            tenant: tenant.into(),
            timeout: DEFAULT_TIMEOUT,
            login,
            store: CredentialStore::new(initial),
            url_overrides: UrlOverrides::default(),
        }
    }

    /// Session authenticated by a long-lived API key. The key is never
    /// renewed.
    pub fn with_api_key(
        environment: Environment,
        tenant: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self::new(
            environment,
            tenant,
            LoginMethod::ApiKey,
            Credential::ApiKey(api_key.into()),
        )
    }

    /// Session authenticated by a previously issued bearer token, with an
    /// optional refresh token for renewal.
    pub fn with_user_token(
        environment: Environment,
        tenant: impl Into<String>,
        token: impl Into<String>,
        refresh: Option<String>,
    ) -> Self {
        Self::new(
            environment,
            tenant,
            LoginMethod::UserToken,
            Credential::Bearer {
                token: token.into(),
                refresh,
            },
        )
    }

    /// Session authenticated by a client-id/secret pair.
    ///
    /// The first call runs unauthenticated, triggers a renewal via the
    /// client-credentials grant, and is replayed with the issued token.
    pub fn with_client_credentials(
        environment: Environment,
        tenant: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self::new(
            environment,
            tenant,
            LoginMethod::ClientCredentials {
                client_id: client_id.into(),
                client_secret: client_secret.into(),
            },
            Credential::Unset,
        )
    }

    /// Session authenticated by user email and password.
    pub fn with_password(
        environment: Environment,
        tenant: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(
            environment,
            tenant,
            LoginMethod::Password {
                email: email.into(),
                password: password.into(),
            },
            Credential::Unset,
        )
    }

    /// Create a session from environment variables.
    ///
    /// Uses `LENDAPI_API_KEY`, or `LENDAPI_CLIENT_ID` plus
    /// `LENDAPI_CLIENT_SECRET`, with optional `LENDAPI_ENVIRONMENT`
    /// (defaults to `production`) and `LENDAPI_TENANT` (defaults to
    /// `default`).
    ///
    /// # Errors
    ///
    /// Returns an error if no credential variables are set or the
    /// environment name is unrecognized.
    pub fn from_env() -> Result<Self> {
        let environment: Environment = match env::var("LENDAPI_ENVIRONMENT") {
            Ok(name) => name.parse()?,
            Err(_) => Environment::Production,
        };
        let tenant = env::var("LENDAPI_TENANT").unwrap_or_else(|_| DEFAULT_TENANT.to_string());

        if let Ok(api_key) = env::var("LENDAPI_API_KEY") {
            return Ok(Self::with_api_key(environment, tenant, api_key));
        }
        match (env::var("LENDAPI_CLIENT_ID"), env::var("LENDAPI_CLIENT_SECRET")) {
            (Ok(id), Ok(secret)) => Ok(Self::with_client_credentials(environment, tenant, id, secret)),
            _ => Err(LendError::Config(
                "set LENDAPI_API_KEY, or LENDAPI_CLIENT_ID and LENDAPI_CLIENT_SECRET".to_string(),
            )),
        }
    }

    /// Create an API-key session from a local credentials file.
    ///
    /// The file is a JSON document with a `configurations` array of
    /// `{tenant, environment, api_key}` entries; the entry matching the
    /// requested environment and tenant is used.
    pub fn from_config_file(
        path: impl AsRef<Path>,
        environment: Environment,
        tenant: &str,
    ) -> Result<Self> {
        let file = CredentialsFile::load(path.as_ref())?;
        let entry = file.select(environment, tenant)?;
        Ok(Self::with_api_key(
            environment,
            entry.tenant.clone(),
            entry.api_key.clone(),
        ))
    }

    /// Override the per-request timeout (default 120 seconds).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the base URL of one service (self-hosted deployments,
    /// tests).
    #[must_use]
    pub fn with_service_url(mut self, service: Service, url: impl Into<String>) -> Self {
        let slot = match service {
            Service::Borrower => &mut self.url_overrides.borrower,
            Service::CreditManagement => &mut self.url_overrides.cms,
            Service::AltData => &mut self.url_overrides.altdata,
        };
        *slot = Some(url.into());
        self
    }

    /// Override the identity-provider base URL.
    #[must_use]
    pub fn with_auth_url(mut self, url: impl Into<String>) -> Self {
        self.url_overrides.auth = Some(url.into());
        self
    }

    /// The base URL a request to `service` should use.
    pub fn service_base_url(&self, service: Service) -> &str {
        let (slot, fallback) = match service {
            Service::Borrower => (&self.url_overrides.borrower, Service::Borrower),
            Service::CreditManagement => (&self.url_overrides.cms, Service::CreditManagement),
            Service::AltData => (&self.url_overrides.altdata, Service::AltData),
        };
        slot.as_deref()
            .unwrap_or_else(|| self.environment.service_base_url(fallback))
    }

    /// The identity-provider base URL renewal requests should use.
    pub fn auth_base_url(&self) -> &str {
        self.url_overrides
            .auth
            .as_deref()
            .unwrap_or_else(|| self.environment.auth_base_url())
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// The session's credential store.
    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub(crate) fn login(&self) -> &LoginMethod {
        &self.login
    }

    pub(crate) fn request_timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_credentials_session_starts_unauthenticated() {
        let session =
            Session::with_client_credentials(Environment::Sandbox, DEFAULT_TENANT, "A", "B");
        assert!(session.store().auth_headers().unwrap().is_empty());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let session = Session::with_api_key(Environment::Production, "acme", "k-secret");
        let debug = format!("{session:?}");
        assert!(debug.contains("acme"));
        assert!(!debug.contains("k-secret"));
    }

    #[test]
    fn url_overrides_win_over_environment_tables() {
        let session = Session::with_api_key(Environment::Production, "acme", "k")
            .with_service_url(Service::Borrower, "http://localhost:4001")
            .with_auth_url("http://localhost:4000");
        assert_eq!(
            session.service_base_url(Service::Borrower),
            "http://localhost:4001"
        );
        assert_eq!(session.auth_base_url(), "http://localhost:4000");
        assert_eq!(
            session.service_base_url(Service::CreditManagement),
            "https://cms.lendcore.io"
        );
    }
}

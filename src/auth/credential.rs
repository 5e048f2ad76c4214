//! Credential storage for a client session.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};

use crate::error::{LendError, Result};

/// The credential currently attached to a session.
///
/// API keys are long-lived and immutable; bearer tokens are short-lived
/// and replaced wholesale when renewed. `Unset` sessions make
/// unauthenticated calls until a renewal installs a bearer token.
#[derive(Clone)]
pub enum Credential {
    ApiKey(String),
    Bearer {
        token: String,
        refresh: Option<String>,
    },
    Unset,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Secrets stay out of debug output.
        match self {
            Credential::ApiKey(_) => f.write_str("ApiKey"),
            Credential::Bearer { refresh, .. } => f
                .debug_struct("Bearer")
                .field("refresh", &refresh.is_some())
                .finish(),
            Credential::Unset => f.write_str("Unset"),
        }
    }
}

/// Identity material configured at session construction.
///
/// This is what the renewal procedure falls back on when no refresh
/// token has been issued yet.
#[derive(Clone)]
pub(crate) enum LoginMethod {
    ApiKey,
    UserToken,
    Password { email: String, password: String },
    ClientCredentials { client_id: String, client_secret: String },
}

/// Holds the currently valid credential for a session.
///
/// The store is mutated in place on renewal; the lock exists only because
/// Rust requires interior mutability through `&self`. Renewal fully
/// completes before the replayed call reads the store, so there is no
/// ordering subtlety within one logical call.
pub struct CredentialStore {
    current: RwLock<Credential>,
}

impl CredentialStore {
    pub(crate) fn new(initial: Credential) -> Self {
        Self {
            current: RwLock::new(initial),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Credential> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Credential> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Headers that should accompany a request.
    ///
    /// API-key sessions send `API-KEY`; bearer sessions send
    /// `Authorization: Bearer <token>` (stripping any `"Bearer "` prefix
    /// already present in the stored value before re-adding it); unset
    /// sessions send nothing.
    pub fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        match &*self.read() {
            Credential::ApiKey(key) => {
                let mut value = HeaderValue::from_str(key).map_err(|_| {
                    LendError::Config("API key contains invalid header characters".to_string())
                })?;
                value.set_sensitive(true);
                headers.insert(HeaderName::from_static("api-key"), value);
            }
            Credential::Bearer { token, .. } => {
                let bare = token.strip_prefix("Bearer ").unwrap_or(token);
                let mut value = HeaderValue::from_str(&format!("Bearer {bare}")).map_err(|_| {
                    LendError::Config("bearer token contains invalid header characters".to_string())
                })?;
                value.set_sensitive(true);
                headers.insert(AUTHORIZATION, value);
            }
            Credential::Unset => {}
        }
        Ok(headers)
    }

    /// Replace the bearer token and refresh token atomically.
    ///
    /// API-key sessions are left untouched: an API key is never renewed
    /// and always takes precedence over bearer-token auth.
    pub fn set_credentials(&self, access: impl Into<String>, refresh: Option<String>) {
        let mut current = self.write();
        if matches!(&*current, Credential::ApiKey(_)) {
            return;
        }
        *current = Credential::Bearer {
            token: access.into(),
            refresh,
        };
    }

    /// The currently stored access token, if the session is bearer-based.
    pub fn access_token(&self) -> Option<String> {
        match &*self.read() {
            Credential::Bearer { token, .. } => Some(token.clone()),
            _ => None,
        }
    }

    /// The currently stored refresh token, if any.
    pub fn refresh_token(&self) -> Option<String> {
        match &*self.read() {
            Credential::Bearer { refresh, .. } => refresh.clone(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_session_sends_api_key_header() {
        let store = CredentialStore::new(Credential::ApiKey("k-123".to_string()));
        let headers = store.auth_headers().unwrap();
        assert_eq!(headers.get("API-KEY").unwrap(), "k-123");
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn api_key_wins_over_bearer_token() {
        // Renewal never downgrades an API-key session, so the API-KEY
        // header is the only one ever sent.
        let store = CredentialStore::new(Credential::ApiKey("k-123".to_string()));
        store.set_credentials("t-456", Some("r-789".to_string()));

        let headers = store.auth_headers().unwrap();
        assert_eq!(headers.get("API-KEY").unwrap(), "k-123");
        assert!(headers.get(AUTHORIZATION).is_none());
        assert_eq!(store.access_token(), None);
    }

    #[test]
    fn bearer_prefix_is_not_duplicated() {
        let store = CredentialStore::new(Credential::Bearer {
            token: "Bearer t-123".to_string(),
            refresh: None,
        });
        let headers = store.auth_headers().unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer t-123");
    }

    #[test]
    fn unset_session_sends_no_auth_headers() {
        let store = CredentialStore::new(Credential::Unset);
        assert!(store.auth_headers().unwrap().is_empty());
    }

    #[test]
    fn set_credentials_replaces_wholesale() {
        let store = CredentialStore::new(Credential::Bearer {
            token: "t-old".to_string(),
            refresh: Some("r-old".to_string()),
        });
        store.set_credentials("t-new", None);
        assert_eq!(store.access_token().as_deref(), Some("t-new"));
        assert_eq!(store.refresh_token(), None);
    }
}

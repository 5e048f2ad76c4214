//! Credential renewal against the identity provider.
//!
//! Strategy selection and request construction are pure so the async and
//! blocking transports share them; only the HTTP call differs.

use serde::Deserialize;

use crate::auth::credential::LoginMethod;
use crate::error::{LendError, Result};

/// Header identifying the tenant on renewal requests. Attached only when
/// the tenant is not the default one.
pub(crate) const TENANT_HEADER: &str = "frontegg-tenant-id";

const PASSWORD_GRANT_PATH: &str = "identity/resources/auth/v1/user";
const CLIENT_GRANT_PATH: &str = "identity/resources/auth/v1/client";
const REFRESH_GRANT_PATH: &str = "identity/resources/auth/v1/api-token/token/refresh";

/// A planned renewal call: which endpoint to POST and with what form
/// fields.
#[derive(Debug)]
pub(crate) struct RenewalRequest {
    pub path: &'static str,
    pub form: Vec<(&'static str, String)>,
}

/// Select the renewal strategy for a session.
///
/// A previously issued refresh token always wins; otherwise the identity
/// material configured at construction decides. API-key sessions and
/// user-token sessions without a refresh token have nothing to renew
/// with, which is a configuration error.
pub(crate) fn plan_renewal(
    login: &LoginMethod,
    refresh_token: Option<String>,
) -> Result<RenewalRequest> {
    if let Some(refresh) = refresh_token {
        return Ok(RenewalRequest {
            path: REFRESH_GRANT_PATH,
            form: vec![("refreshToken", refresh)],
        });
    }

    match login {
        LoginMethod::Password { email, password } => Ok(RenewalRequest {
            path: PASSWORD_GRANT_PATH,
            form: vec![("email", email.clone()), ("password", password.clone())],
        }),
        LoginMethod::ClientCredentials {
            client_id,
            client_secret,
        } => Ok(RenewalRequest {
            path: CLIENT_GRANT_PATH,
            form: vec![
                ("clientId", client_id.clone()),
                ("clientSecret", client_secret.clone()),
            ],
        }),
        LoginMethod::ApiKey => Err(LendError::Config(
            "API-key sessions do not renew credentials".to_string(),
        )),
        LoginMethod::UserToken => Err(LendError::Config(
            "user-token session has no refresh token to renew with".to_string(),
        )),
    }
}

/// Identity-provider response to a successful renewal.
///
/// Password grants never return a refresh token; client and refresh
/// grants do.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenGrant {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_login() -> LoginMethod {
        LoginMethod::ClientCredentials {
            client_id: "A".to_string(),
            client_secret: "B".to_string(),
        }
    }

    #[test]
    fn client_credentials_used_before_first_refresh_token() {
        let plan = plan_renewal(&client_login(), None).unwrap();
        assert_eq!(plan.path, CLIENT_GRANT_PATH);
        assert_eq!(
            plan.form,
            vec![("clientId", "A".to_string()), ("clientSecret", "B".to_string())]
        );
    }

    #[test]
    fn refresh_token_takes_precedence_once_issued() {
        let plan = plan_renewal(&client_login(), Some("R1".to_string())).unwrap();
        assert_eq!(plan.path, REFRESH_GRANT_PATH);
        assert_eq!(plan.form, vec![("refreshToken", "R1".to_string())]);
    }

    #[test]
    fn password_grant_sends_email_and_password() {
        let login = LoginMethod::Password {
            email: "dev@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let plan = plan_renewal(&login, None).unwrap();
        assert_eq!(plan.path, PASSWORD_GRANT_PATH);
        assert_eq!(plan.form[0], ("email", "dev@example.com".to_string()));
    }

    #[test]
    fn api_key_sessions_cannot_renew() {
        let err = plan_renewal(&LoginMethod::ApiKey, None).unwrap_err();
        assert!(matches!(err, LendError::Config(_)));
    }

    #[test]
    fn user_token_without_refresh_cannot_renew() {
        let err = plan_renewal(&LoginMethod::UserToken, None).unwrap_err();
        assert!(matches!(err, LendError::Config(_)));
    }

    #[test]
    fn grant_parses_with_and_without_refresh_token() {
        let grant: TokenGrant =
            serde_json::from_str(r#"{"accessToken":"T1","refreshToken":"R1"}"#).unwrap();
        assert_eq!(grant.access_token, "T1");
        assert_eq!(grant.refresh_token.as_deref(), Some("R1"));

        let grant: TokenGrant = serde_json::from_str(r#"{"accessToken":"T2"}"#).unwrap();
        assert_eq!(grant.refresh_token, None);
    }
}

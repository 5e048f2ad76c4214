//! Retry-once policy for expired credentials.
//!
//! The policy is written once and adapted to the two calling conventions
//! by a pair of minimal wrappers over injected `call` and `renew`
//! operations: invoke the call; iff it failed because the credential
//! expired, renew and invoke it exactly once more. The second outcome is
//! final. Any other error, and any renewal error, propagates untouched.

use std::future::Future;

use crate::error::{LendError, Result};

/// Whether an error should trigger renewal and a single replay.
///
/// Only HTTP 401 qualifies; 403 is a permission error, not an expired
/// credential, and is never retried.
fn should_renew(err: &LendError) -> bool {
    err.is_credential_expired()
}

/// Async adapter for the retry-once policy.
pub(crate) async fn retry_once_on_expired<T, F, Fut, R, RFut>(call: F, renew: R) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
    R: FnOnce() -> RFut,
    RFut: Future<Output = Result<()>>,
{
    match call().await {
        Err(err) if should_renew(&err) => {
            renew().await?;
            call().await
        }
        outcome => outcome,
    }
}

/// Blocking adapter for the retry-once policy. Identical semantics to
/// [`retry_once_on_expired`].
pub(crate) fn retry_once_on_expired_blocking<T, F, R>(call: F, renew: R) -> Result<T>
where
    F: Fn() -> Result<T>,
    R: FnOnce() -> Result<()>,
{
    match call() {
        Err(err) if should_renew(&err) => {
            renew()?;
            call()
        }
        outcome => outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn expired() -> LendError {
        LendError::Unauthorized {
            message: "token expired".to_string(),
        }
    }

    fn server_error() -> LendError {
        LendError::Api {
            status: 500,
            code: None,
            message: "boom".to_string(),
            details: None,
        }
    }

    #[tokio::test]
    async fn renews_once_and_returns_second_outcome() {
        let attempts = Cell::new(0u32);
        let renewals = Cell::new(0u32);

        let result = retry_once_on_expired(
            || async {
                attempts.set(attempts.get() + 1);
                if attempts.get() == 1 {
                    Err(expired())
                } else {
                    Ok(42)
                }
            },
            || async {
                renewals.set(renewals.get() + 1);
                Ok(())
            },
        )
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.get(), 2);
        assert_eq!(renewals.get(), 1);
    }

    #[tokio::test]
    async fn first_success_skips_renewal() {
        let attempts = Cell::new(0u32);
        let renewals = Cell::new(0u32);

        let result = retry_once_on_expired(
            || async {
                attempts.set(attempts.get() + 1);
                Ok("ok")
            },
            || async {
                renewals.set(renewals.get() + 1);
                Ok(())
            },
        )
        .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(attempts.get(), 1);
        assert_eq!(renewals.get(), 0);
    }

    #[tokio::test]
    async fn non_auth_errors_propagate_without_retry() {
        let attempts = Cell::new(0u32);
        let renewals = Cell::new(0u32);

        let result: Result<()> = retry_once_on_expired(
            || async {
                attempts.set(attempts.get() + 1);
                Err(server_error())
            },
            || async {
                renewals.set(renewals.get() + 1);
                Ok(())
            },
        )
        .await;

        assert!(matches!(result, Err(LendError::Api { status: 500, .. })));
        assert_eq!(attempts.get(), 1);
        assert_eq!(renewals.get(), 0);
    }

    #[tokio::test]
    async fn forbidden_is_not_retried() {
        let attempts = Cell::new(0u32);

        let result: Result<()> = retry_once_on_expired(
            || async {
                attempts.set(attempts.get() + 1);
                Err(LendError::Forbidden {
                    message: "no access to resource".to_string(),
                })
            },
            || async { Ok(()) },
        )
        .await;

        assert!(matches!(result, Err(LendError::Forbidden { .. })));
        assert_eq!(attempts.get(), 1);
    }

    #[tokio::test]
    async fn second_auth_failure_is_final() {
        let attempts = Cell::new(0u32);
        let renewals = Cell::new(0u32);

        let result: Result<()> = retry_once_on_expired(
            || async {
                attempts.set(attempts.get() + 1);
                Err(expired())
            },
            || async {
                renewals.set(renewals.get() + 1);
                Ok(())
            },
        )
        .await;

        assert!(matches!(result, Err(LendError::Unauthorized { .. })));
        assert_eq!(attempts.get(), 2);
        assert_eq!(renewals.get(), 1);
    }

    #[tokio::test]
    async fn renewal_failure_skips_the_replay() {
        let attempts = Cell::new(0u32);

        let result: Result<()> = retry_once_on_expired(
            || async {
                attempts.set(attempts.get() + 1);
                Err(expired())
            },
            || async {
                Err(LendError::Renewal {
                    status: 400,
                    message: "bad client secret".to_string(),
                })
            },
        )
        .await;

        assert!(matches!(result, Err(LendError::Renewal { .. })));
        assert_eq!(attempts.get(), 1);
    }

    // The blocking adapter must behave identically.

    #[test]
    fn blocking_renews_once_and_returns_second_outcome() {
        let attempts = Cell::new(0u32);
        let renewals = Cell::new(0u32);

        let result = retry_once_on_expired_blocking(
            || {
                attempts.set(attempts.get() + 1);
                if attempts.get() == 1 {
                    Err(expired())
                } else {
                    Ok(42)
                }
            },
            || {
                renewals.set(renewals.get() + 1);
                Ok(())
            },
        );

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.get(), 2);
        assert_eq!(renewals.get(), 1);
    }

    #[test]
    fn blocking_bounds_the_retry() {
        let attempts = Cell::new(0u32);
        let renewals = Cell::new(0u32);

        let result: Result<()> = retry_once_on_expired_blocking(
            || {
                attempts.set(attempts.get() + 1);
                Err(expired())
            },
            || {
                renewals.set(renewals.get() + 1);
                Ok(())
            },
        );

        assert!(matches!(result, Err(LendError::Unauthorized { .. })));
        assert_eq!(attempts.get(), 2);
        assert_eq!(renewals.get(), 1);
    }

    #[test]
    fn blocking_propagates_non_auth_errors() {
        let attempts = Cell::new(0u32);

        let result: Result<()> = retry_once_on_expired_blocking(
            || {
                attempts.set(attempts.get() + 1);
                Err(server_error())
            },
            || Ok(()),
        );

        assert!(matches!(result, Err(LendError::Api { .. })));
        assert_eq!(attempts.get(), 1);
    }
}

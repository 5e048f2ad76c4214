//! Credential storage, renewal, and the retry-once policy.

mod credential;
pub(crate) mod renewal;
pub(crate) mod retry;

pub use credential::{Credential, CredentialStore};
pub(crate) use credential::LoginMethod;

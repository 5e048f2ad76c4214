//! Local credentials file support.
//!
//! A credentials file holds one API key per tenant/environment pair:
//!
//! ```json
//! {
//!   "configurations": [
//!     {"tenant": "acme", "environment": "production", "api_key": "k-1"},
//!     {"tenant": "acme", "environment": "sandbox", "api_key": "k-2"}
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::environment::Environment;
use crate::error::{LendError, Result};
use crate::session::DEFAULT_TENANT;

/// A parsed credentials file.
#[derive(Debug, Deserialize)]
pub struct CredentialsFile {
    pub configurations: Vec<StoredConfiguration>,
}

/// One stored tenant/environment/API-key entry.
#[derive(Debug, Clone, Deserialize)]
pub struct StoredConfiguration {
    pub tenant: String,
    pub environment: String,
    #[serde(alias = "apiKey")]
    pub api_key: String,
}

impl CredentialsFile {
    /// Read and parse a credentials file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            LendError::Config(format!("cannot read credentials file {}: {e}", path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            LendError::Config(format!("malformed credentials file {}: {e}", path.display()))
        })
    }

    /// Pick the entry for an environment and tenant.
    ///
    /// Requesting the default tenant matches the first entry for the
    /// environment; any other tenant must match exactly.
    pub fn select(&self, environment: Environment, tenant: &str) -> Result<&StoredConfiguration> {
        let wanted = environment.to_string();
        self.configurations
            .iter()
            .filter(|entry| entry.environment == wanted)
            .find(|entry| tenant == DEFAULT_TENANT || entry.tenant == tenant)
            .ok_or_else(|| {
                LendError::Config(format!(
                    "no stored configuration for tenant {tenant:?} in {wanted}"
                ))
            })
    }
}

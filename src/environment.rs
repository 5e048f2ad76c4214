//! Deployment environments and their fixed base URLs.
//!
//! Each environment maps to hardcoded base URLs for the identity provider
//! and the three wrapped services. An unrecognized environment name is a
//! configuration error raised before any network I/O.

use std::fmt;
use std::str::FromStr;

use crate::error::LendError;

/// A named deployment target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Staging,
    Sandbox,
    Local,
}

/// One of the wrapped remote services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Borrower records and their satellite resources.
    Borrower,
    /// Credit-management service (credit clients, debts).
    CreditManagement,
    /// Alternative-data lookups.
    AltData,
}

impl Environment {
    /// Base URL of the identity provider used for credential renewal.
    pub fn auth_base_url(&self) -> &'static str {
        match self {
            Environment::Production => "https://auth.lendcore.io",
            Environment::Staging => "https://auth.staging.lendcore.io",
            Environment::Sandbox => "https://auth.sandbox.lendcore.io",
            Environment::Local => "http://localhost:9000",
        }
    }

    /// Base URL for a service in this environment.
    pub fn service_base_url(&self, service: Service) -> &'static str {
        match (self, service) {
            (Environment::Production, Service::Borrower) => "https://borrowers.lendcore.io",
            (Environment::Production, Service::CreditManagement) => "https://cms.lendcore.io",
            (Environment::Production, Service::AltData) => "https://data.lendcore.io",
            (Environment::Staging, Service::Borrower) => "https://borrowers.staging.lendcore.io",
            (Environment::Staging, Service::CreditManagement) => "https://cms.staging.lendcore.io",
            (Environment::Staging, Service::AltData) => "https://data.staging.lendcore.io",
            (Environment::Sandbox, Service::Borrower) => "https://borrowers.sandbox.lendcore.io",
            (Environment::Sandbox, Service::CreditManagement) => "https://cms.sandbox.lendcore.io",
            (Environment::Sandbox, Service::AltData) => "https://data.sandbox.lendcore.io",
            (Environment::Local, Service::Borrower) => "http://localhost:8001",
            (Environment::Local, Service::CreditManagement) => "http://localhost:8002",
            (Environment::Local, Service::AltData) => "http://localhost:8003",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Environment::Production => "production",
            Environment::Staging => "staging",
            Environment::Sandbox => "sandbox",
            Environment::Local => "local",
        };
        f.write_str(name)
    }
}

impl FromStr for Environment {
    type Err = LendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            "sandbox" => Ok(Environment::Sandbox),
            "local" => Ok(Environment::Local),
            other => Err(LendError::Config(format!("unknown environment: {other}"))),
        }
    }
}

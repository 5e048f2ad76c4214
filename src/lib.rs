//! Lendcore API client library.
//!
//! A Rust library for the Lendcore lending platform's REST APIs: the
//! borrower service, the credit-management service, and the
//! alternative-data service. Entity operations are defined as capability
//! traits (`Retrieve`, `Create`, `Patch`, `Delete`, `Query`) that model
//! types opt into, and every call transparently renews an expired access
//! credential and replays the request exactly once.
//!
//! # Quick Start
//!
//! ```no_run
//! use lendapi::{Borrower, BorrowerFilter, LendClient, Query, Retrieve, Session};
//!
//! #[tokio::main]
//! async fn main() -> lendapi::Result<()> {
//!     // Create a session from environment variables
//!     let client = LendClient::new(Session::from_env()?)?;
//!
//!     // Fetch a borrower by id (404 maps to None)
//!     if let Some(borrower) = Borrower::retrieve(&client, "b-123").await? {
//!         println!("Borrower: {}", borrower.persona);
//!     }
//!
//!     // Query borrowers by persona
//!     let filter = BorrowerFilter {
//!         persona: Some("person".to_string()),
//!         ..Default::default()
//!     };
//!     let borrowers = Borrower::query_all(&client, &filter).await?;
//!     println!("Found {} borrowers", borrowers.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Calling conventions
//!
//! The same operations exist for callers without an async runtime via
//! [`blocking::LendClient`] and the `_blocking` trait methods; retry and
//! renewal semantics are identical in both conventions.
//!
//! # Authentication
//!
//! A [`Session`] is configured with exactly one of: a long-lived API key,
//! a user bearer token (with optional refresh token), a client-id/secret
//! pair, or email/password. Bearer-based sessions renew transparently on
//! the first HTTP 401 of a call and replay the request once; API keys are
//! never renewed.
//!
//! # Configuration
//!
//! [`Session::from_env`] reads:
//!
//! - `LENDAPI_API_KEY`, or `LENDAPI_CLIENT_ID` + `LENDAPI_CLIENT_SECRET`
//! - `LENDAPI_ENVIRONMENT` (optional, defaults to `production`)
//! - `LENDAPI_TENANT` (optional, defaults to `default`)

mod auth;
pub mod blocking;
mod client;
mod config;
mod environment;
mod error;
mod models;
mod pagination;
mod session;
mod traits;

pub mod cli;
pub mod output;

// Re-export core types
pub use auth::{Credential, CredentialStore};
pub use client::LendClient;
pub use config::{CredentialsFile, StoredConfiguration};
pub use environment::{Environment, Service};
pub use error::{LendError, Result};
pub use pagination::{QueryParams, DEFAULT_PAGE_SIZE};
pub use session::{Session, DEFAULT_TENANT};

// Re-export traits
pub use traits::{Create, Delete, Patch, Query, Resource, Retrieve};

// Re-export models
pub use models::{
    // Borrower service
    Authorization,
    AuthorizationFilter,
    Borrower,
    BorrowerField,
    BorrowerFieldFilter,
    BorrowerFilter,
    CreateAuthorization,
    CreateBorrower,
    CreateBorrowerField,
    UpdateBorrower,
    UpdateBorrowerField,
    // Credit-management service
    Balance,
    CreateCreditClient,
    CreditClient,
    CreditClientFilter,
    Debt,
    DebtFilter,
    Money,
    Payment,
    PaymentInput,
    Penalty,
    // Alternative-data service
    DataRequest,
    SourceConfig,
    SourceOutput,
};

//! Lendcore API model types.

mod authorization;
mod borrower;
mod borrower_field;
mod credit_client;
mod data_request;
mod debt;

pub use authorization::*;
pub use borrower::*;
pub use borrower_field::*;
pub use credit_client::*;
pub use data_request::*;
pub use debt::*;

//! Capability traits for resource operations.
//!
//! Every entity type describes itself once via [`Resource`] and opts in
//! to the operations its endpoints support with empty `impl` blocks; the
//! trait default bodies supply the behavior, including transparent
//! credential renewal, for both calling conventions.

mod create;
mod delete;
mod patch;
mod query;
mod resource;
mod retrieve;

pub use create::Create;
pub use delete::Delete;
pub use patch::Patch;
pub use query::Query;
pub use resource::Resource;
pub use retrieve::Retrieve;

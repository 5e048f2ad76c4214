//! Resource descriptions shared by all capability traits.

use serde::de::DeserializeOwned;

use crate::environment::Service;

/// A REST resource exposed by one of the wrapped services.
///
/// Implementors are the retrieve-shaped DTO for the entity; the
/// associated constants tell the capability traits where the collection
/// lives.
pub trait Resource: DeserializeOwned + Send + Sync + Sized + 'static {
    /// The service hosting this resource.
    const SERVICE: Service;

    /// Versioned collection path, e.g. `v1/borrowers`.
    const PATH: &'static str;

    /// Name of the id property in create responses.
    const ID_FIELD: &'static str = "id";

    /// Path of a single member of the collection.
    fn member_path(id: &str) -> String {
        format!("{}/{}", Self::PATH, urlencoding::encode(id))
    }
}

//! Image store trait for the external object-storage collaborator.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for the object store that holds listing images.
///
/// The [`ImageStore`] trait is defined here in `estately-core` and
/// implemented in `estately-storage`. Uploads return a public URL; deletes
/// address objects by their storage resource identifier (the path suffix
/// below the store's root segment, without file extension).
#[async_trait]
pub trait ImageStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Upload an image and return its publicly reachable URL.
    ///
    /// `filename` is only a hint used to preserve the file extension; the
    /// stored object gets a fresh unique key.
    async fn upload(&self, filename: &str, data: Bytes) -> AppResult<String>;

    /// Delete the objects identified by the given resource identifiers.
    ///
    /// Individual missing objects are skipped; an I/O fault on the store
    /// itself surfaces as a storage error.
    async fn delete_many(&self, resource_ids: &[String]) -> AppResult<()>;
}

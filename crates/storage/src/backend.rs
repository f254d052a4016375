use async_trait::async_trait;
use thiserror::Error;

use crate::record::{Fields, RecordId, RemoteRecord};

/// Errors surfaced by document backends.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BackendError {
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Contract for a remote document store.
///
/// One collection per record type, ids assigned by the backend. The store
/// facade decides what happens when these calls fail; implementations just
/// report honestly.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// List every document in a collection.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` when the collection cannot be read.
    async fn list(&self, collection: &str) -> Result<Vec<RemoteRecord>, BackendError>;

    /// Insert a document and return the id the backend assigned.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` when the document cannot be stored.
    async fn insert(&self, collection: &str, fields: &Fields) -> Result<RecordId, BackendError>;

    /// Overlay fields onto an existing document.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` when the document cannot be updated.
    async fn update(
        &self,
        collection: &str,
        id: &RecordId,
        fields: &Fields,
    ) -> Result<(), BackendError>;

    /// Delete a document.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` when the document cannot be deleted.
    async fn delete(&self, collection: &str, id: &RecordId) -> Result<(), BackendError>;
}

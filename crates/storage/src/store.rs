use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use skillscan_core::Clock;

use crate::backend::{BackendError, DocumentBackend};
use crate::config::RemoteConfig;
use crate::memory::MemoryCollections;
use crate::record::{Fields, RecordId, RemoteRecord};
use crate::rest::RestBackend;

/// Errors surfaced by `RemoteStore` writes.
///
/// Reads have no error type at all; see [`RemoteStore::fetch_all`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    #[error("write to collection `{collection}` failed")]
    WriteFailed {
        collection: String,
        #[source]
        source: BackendError,
    },
}

/// Facade over the remote document store.
///
/// Reads and writes degrade differently by contract:
///
/// * reads fall back to the in-memory substitute and never fail, so callers
///   always have something to show;
/// * writes against a configured backend fail loudly, so nobody is told a
///   result was saved when it was not.
///
/// With no backend configured both sides run against the substitute, and
/// writes succeed there (there is no remote copy to diverge from).
#[derive(Clone)]
pub struct RemoteStore {
    backend: Option<Arc<dyn DocumentBackend>>,
    substitute: MemoryCollections,
}

impl RemoteStore {
    /// Store with no remote backend; all traffic goes to the substitute.
    #[must_use]
    pub fn unconfigured(clock: Clock) -> Self {
        Self {
            backend: None,
            substitute: MemoryCollections::new(clock),
        }
    }

    /// Store backed by `backend`, with the substitute kept for read fallback.
    #[must_use]
    pub fn with_backend(backend: Arc<dyn DocumentBackend>, clock: Clock) -> Self {
        Self {
            backend: Some(backend),
            substitute: MemoryCollections::new(clock),
        }
    }

    /// Builds the store from environment settings, degrading to the
    /// substitute when they are missing or placeholders.
    #[must_use]
    pub fn from_env(clock: Clock) -> Self {
        match RemoteConfig::from_env() {
            Some(config) => Self::with_backend(Arc::new(RestBackend::new(config)), clock),
            None => {
                debug!("no document backend configured, using substitute collections");
                Self::unconfigured(clock)
            }
        }
    }

    /// Whether a remote backend is attached.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Every record in `collection`.
    ///
    /// A successful remote read also refreshes the substitute, so later
    /// outages serve the last data actually seen. A failed read is logged
    /// and answered from the substitute. The infallible signature is the
    /// point: showing stale rows beats an error screen.
    pub async fn fetch_all(&self, collection: &str) -> Vec<RemoteRecord> {
        if let Some(backend) = &self.backend {
            match backend.list(collection).await {
                Ok(records) => {
                    self.substitute.replace_all(collection, records.clone());
                    return records;
                }
                Err(error) => {
                    warn!(collection, %error, "remote read failed, serving substitute data");
                }
            }
        }
        self.substitute.fetch_all(collection)
    }

    /// Stores a new record and returns its id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` when the configured backend rejects
    /// the write. The substitute is not written in that case; a failed save
    /// stays visible as a failure.
    pub async fn create(&self, collection: &str, fields: Fields) -> Result<RecordId, StoreError> {
        match &self.backend {
            Some(backend) => backend
                .insert(collection, &fields)
                .await
                .map_err(|source| write_failed(collection, source)),
            None => Ok(self.substitute.create(collection, fields)),
        }
    }

    /// Overlays fields onto an existing record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` when the configured backend rejects
    /// the write.
    pub async fn update(
        &self,
        collection: &str,
        id: &RecordId,
        fields: &Fields,
    ) -> Result<(), StoreError> {
        match &self.backend {
            Some(backend) => backend
                .update(collection, id, fields)
                .await
                .map_err(|source| write_failed(collection, source)),
            None => {
                self.substitute.update(collection, id, fields);
                Ok(())
            }
        }
    }

    /// Removes a record.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::WriteFailed` when the configured backend rejects
    /// the write.
    pub async fn remove(&self, collection: &str, id: &RecordId) -> Result<(), StoreError> {
        match &self.backend {
            Some(backend) => backend
                .delete(collection, id)
                .await
                .map_err(|source| write_failed(collection, source)),
            None => {
                self.substitute.remove(collection, id);
                Ok(())
            }
        }
    }
}

fn write_failed(collection: &str, source: BackendError) -> StoreError {
    StoreError::WriteFailed {
        collection: collection.to_owned(),
        source,
    }
}

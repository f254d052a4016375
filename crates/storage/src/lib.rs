#![forbid(unsafe_code)]

//! Persistence for quiz data: a REST document backend, an in-memory
//! substitute, and the `RemoteStore` facade that decides which one answers.

pub mod backend;
pub mod config;
pub mod memory;
pub mod record;
pub mod rest;
pub mod store;

pub use backend::{BackendError, DocumentBackend};
pub use config::RemoteConfig;
pub use memory::MemoryCollections;
pub use record::{Fields, RecordId, RemoteRecord};
pub use rest::RestBackend;
pub use store::{RemoteStore, StoreError};

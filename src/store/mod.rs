//! Persistence layer for recipe documents.
//!
//! Handlers talk to a [`RecipeStore`] trait object so the backing collection
//! can be swapped without touching the HTTP layer. The handle is opened once
//! at startup with [`connect`], shared through the router state, and closed
//! during shutdown.
//!
//! # Backends
//!
//! - `document`: SQLite table of JSON documents, in memory or in a database file
//! - `offline`: stand-in used when the startup connection failed
//! - `connection`: connection string parsing
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod connection;
mod document;
mod offline;

pub use connection::ConnectionTarget;
pub use document::DocumentStore;
pub use offline::OfflineStore;

use crate::error::StoreResult;
use crate::models::{Recipe, RecipeFields, RecipeId};
use crate::utils::logging::sanitize_url;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info};

/// Shared handle to whichever store the process opened
pub type SharedStore = Arc<dyn RecipeStore>;

/// Whether an update or delete touched a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Matched,
    NoMatch,
}

/// Single-document operations over the recipe collection.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Store a new document and return it with its assigned id
    async fn insert(&self, fields: RecipeFields) -> StoreResult<Recipe>;

    /// Fetch one document; `StoreError::NotFound` when the id resolves to nothing
    async fn find_by_id(&self, id: RecipeId) -> StoreResult<Recipe>;

    /// Every document, in insertion order
    async fn find_all(&self) -> StoreResult<Vec<Recipe>>;

    /// Overwrite all content fields of the document
    async fn update_by_id(&self, id: RecipeId, fields: RecipeFields) -> StoreResult<WriteOutcome>;

    async fn delete_by_id(&self, id: RecipeId) -> StoreResult<WriteOutcome>;

    /// Cheap reachability check used by the health endpoint
    async fn ping(&self) -> StoreResult<()>;

    /// Flush pending state and release the store
    async fn close(&self) -> StoreResult<()>;
}

/// Open the store named by `url`.
pub async fn connect(url: &str) -> StoreResult<SharedStore> {
    let store: SharedStore = match ConnectionTarget::parse(url)? {
        ConnectionTarget::Memory => Arc::new(DocumentStore::in_memory().await?),
        ConnectionTarget::File(path) => Arc::new(DocumentStore::open(path).await?),
    };
    Ok(store)
}

/// Open the store, falling back to an [`OfflineStore`] when that fails.
///
/// The outcome is logged either way; the server keeps answering requests
/// and the connection is not retried.
pub async fn connect_or_offline(url: &str) -> SharedStore {
    let display_url = sanitize_url(url);
    match connect(url).await {
        Ok(store) => {
            info!("Document store connected: {}", display_url);
            store
        }
        Err(e) => {
            error!("Document store connection to {} failed: {}", display_url, e);
            Arc::new(OfflineStore::new(e.to_string()))
        }
    }
}

//! # Generic Resource Store
//!
//! A [`ResourceStore`] caches one backend collection together with the
//! `loading` flag and last `error` message of the most recent action.
//! Every action follows the same envelope:
//!
//! 1. set `loading = true`, clear `error`;
//! 2. await the remote call;
//! 3. on success apply the response to the cache, on failure record the
//!    backend `detail` (or the action's fallback message);
//! 4. clear `loading`, also when the action future is dropped mid-flight.
//!
//! State lives behind `Arc<parking_lot::RwLock<..>>`. The lock is taken only
//! for synchronous reads and writes, never across `.await`, so handles can
//! be cloned freely and shared across tasks. Concurrent actions are not
//! ordered: whichever response resolves last wins.

use std::future::Future;
use std::sync::Arc;

use mtrack_client::{ApiError, Resource, ResourceClient};
use parking_lot::RwLock;

use crate::error::StoreError;

/// Observable state of one store.
#[derive(Debug, Clone)]
pub struct StoreState<R> {
    pub items: Vec<R>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<R> Default for StoreState<R> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

/// Clears `loading` when an action settles or is dropped.
struct LoadingGuard<R> {
    state: Arc<RwLock<StoreState<R>>>,
}

impl<R> Drop for LoadingGuard<R> {
    fn drop(&mut self) {
        self.state.write().loading = false;
    }
}

/// Cached collection of `R` kept in sync with the backend.
pub struct ResourceStore<R: Resource> {
    state: Arc<RwLock<StoreState<R>>>,
    client: ResourceClient<R>,
}

impl<R: Resource> Clone for ResourceStore<R> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            client: self.client.clone(),
        }
    }
}

impl<R: Resource + std::fmt::Debug> std::fmt::Debug for ResourceStore<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceStore")
            .field("state", &*self.state.read())
            .field("client", &self.client)
            .finish()
    }
}

impl<R: Resource> ResourceStore<R> {
    /// Create an empty store backed by `client`.
    pub fn new(client: ResourceClient<R>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            client,
        }
    }

    pub(crate) fn client(&self) -> &ResourceClient<R> {
        &self.client
    }

    // -- Accessors ------------------------------------------------------------

    /// Copy of the cached collection, in server order.
    pub fn items(&self) -> Vec<R> {
        self.state.read().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Message of the most recent failed action, cleared when the next
    /// action starts.
    pub fn error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// Consistent copy of the whole state.
    pub fn snapshot(&self) -> StoreState<R> {
        self.state.read().clone()
    }

    /// First cached record with the given id.
    pub fn find(&self, id: R::Id) -> Option<R> {
        self.state.read().items.iter().find(|r| r.id() == id).cloned()
    }

    // -- Actions --------------------------------------------------------------

    /// Reload the whole collection.
    ///
    /// On failure the cached items are kept and `error` is set; the failure
    /// is not returned.
    pub async fn fetch_all(&self) {
        let fallback = format!("Failed to fetch {}", R::PLURAL);
        let _ = self
            .run("fetch_all", fallback, self.client.list(), |state, items| {
                state.items = items;
            })
            .await;
    }

    /// Create a record and append the stored representation to the cache.
    pub async fn create(&self, draft: &R::Draft) -> Result<R, StoreError> {
        let fallback = format!("Failed to create {}", R::SINGULAR);
        self.run("create", fallback, self.client.create(draft), |state, record| {
            state.items.push(record.clone());
            record
        })
        .await
    }

    /// Replace a record and swap the cached copy in place.
    pub async fn update(&self, id: R::Id, draft: &R::Draft) -> Result<R, StoreError> {
        let fallback = format!("Failed to update {}", R::SINGULAR);
        self.run(
            "update",
            fallback,
            self.client.update(id, draft),
            move |state, record| {
                replace_by_id(&mut state.items, id, &record);
                record
            },
        )
        .await
    }

    /// Delete a record and drop every cached copy of it.
    pub async fn delete(&self, id: R::Id) -> Result<(), StoreError> {
        let fallback = format!("Failed to delete {}", R::SINGULAR);
        self.run("delete", fallback, self.client.delete(id), move |state, ()| {
            state.items.retain(|r| r.id() != id);
        })
        .await
    }

    /// Run one action inside the loading/error envelope.
    ///
    /// `apply` runs under the write lock before `loading` is cleared, so a
    /// reader never sees `loading == false` with a stale cache.
    pub(crate) async fn run<T, O, Fut>(
        &self,
        action: &'static str,
        fallback: String,
        call: Fut,
        apply: impl FnOnce(&mut StoreState<R>, T) -> O,
    ) -> Result<O, StoreError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let _guard = self.begin();
        match call.await {
            Ok(value) => {
                let mut state = self.state.write();
                Ok(apply(&mut *state, value))
            }
            Err(source) => {
                let message = source.detail().unwrap_or(fallback);
                tracing::error!(
                    store = R::PLURAL,
                    action,
                    error = %source,
                    "{message}"
                );
                self.state.write().error = Some(message.clone());
                Err(StoreError::new(message, source))
            }
        }
    }

    fn begin(&self) -> LoadingGuard<R> {
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }
        LoadingGuard {
            state: Arc::clone(&self.state),
        }
    }
}

/// Replace the first record whose id matches, keeping its position.
///
/// Returns `false` (and leaves `items` alone) when the id is not cached.
pub(crate) fn replace_by_id<R: Resource>(items: &mut [R], id: R::Id, record: &R) -> bool {
    match items.iter_mut().find(|r| r.id() == id) {
        Some(slot) => {
            *slot = record.clone();
            true
        }
        None => {
            tracing::warn!(
                store = R::PLURAL,
                %id,
                "record not in cache; local copy left unchanged"
            );
            false
        }
    }
}

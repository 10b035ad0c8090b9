use std::sync::Arc;

use tokio::task;

use crate::{dao::player_store::PlayerStore, error::ServiceError};

/// Cheaply clonable handle on the application state.
pub type SharedState = Arc<AppState>;

/// Central application state holding the player store.
pub struct AppState {
    store: Arc<dyn PlayerStore>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(store: Arc<dyn PlayerStore>) -> SharedState {
        Arc::new(Self { store })
    }

    /// Obtain a handle to the installed player store.
    pub fn store(&self) -> Arc<dyn PlayerStore> {
        Arc::clone(&self.store)
    }

    /// Run `work` against the store on the blocking thread pool.
    ///
    /// Store calls may block on file I/O and must stay off the async workers.
    pub async fn with_store<F, T>(&self, work: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&dyn PlayerStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store();
        let value = task::spawn_blocking(move || work(store.as_ref())).await?;
        Ok(value)
    }
}

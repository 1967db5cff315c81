//! Shared router state.
//!
//! # Invariants
//! - One SQLite connection per process, guarded by a mutex; a request holds
//!   the lock for its whole catalog read, so it sees one snapshot.
//! - Catalog work runs on the blocking pool, never on async workers.
//! - A panicked task does not take the connection down; later requests
//!   reuse it (all catalog access is read-only).

use crate::error::ApiError;
use orgcatalog_core::{CatalogError, CatalogResult, SqliteCatalogService};
use rusqlite::Connection;
use log::warn;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
    api_key: Arc<str>,
}

impl AppState {
    /// `conn` must already be migrated (see `orgcatalog_core::open_db`).
    pub fn new(conn: Connection, api_key: impl Into<Arc<str>>) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            api_key: api_key.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Runs `op` against a catalog service on the blocking pool.
    pub async fn with_catalog<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&SqliteCatalogService<'_>) -> CatalogResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || -> Result<T, ApiError> {
            let guard = conn.lock().unwrap_or_else(|poisoned| {
                warn!("event=catalog_lock module=server status=recovered reason=poisoned");
                PoisonError::into_inner(poisoned)
            });
            let service = SqliteCatalogService::sqlite(&guard).map_err(CatalogError::from)?;
            Ok(op(&service)?)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("catalog task failed: {err}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::AppState;
    use crate::error::ApiError;
    use orgcatalog_core::{open_db_in_memory, seed_catalog, CatalogResult};

    #[tokio::test]
    async fn panicked_task_does_not_poison_later_requests() {
        let mut conn = open_db_in_memory().expect("in-memory catalog should open");
        seed_catalog(&mut conn).expect("seeding should succeed");
        let state = AppState::new(conn, "k");

        let err = state
            .with_catalog(|_| -> CatalogResult<()> { panic!("catalog task blew up") })
            .await
            .expect_err("panicking task should surface as an error");
        assert!(matches!(err, ApiError::Internal(_)));

        let found = state
            .with_catalog(|catalog| catalog.organization(1))
            .await
            .expect("connection should be usable after a panic");
        assert_eq!(found.id, 1);
    }
}

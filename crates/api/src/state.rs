use std::sync::Arc;

use clubdir_core::store::ClubStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind `Arc` or is already a handle.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for CRUD and auth.
    pub pool: clubdir_db::DbPool,
    /// Club store the bulk-upload pipeline runs against.
    pub store: Arc<dyn ClubStore>,
    pub config: Arc<ServerConfig>,
}

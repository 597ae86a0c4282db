use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;

/// Shared per-request state: one connection handle per store.
///
/// `ops` and `stats` are read-only from this service's perspective; the
/// auth store is the only one written to (login audit rows).
#[derive(Clone)]
pub struct AppState {
    pub ops: DatabaseConnection,
    pub stats: DatabaseConnection,
    pub auth: DatabaseConnection,
    pub config: Arc<Config>,
}

impl AppState {
    #[must_use]
    pub fn new(
        ops: DatabaseConnection,
        stats: DatabaseConnection,
        auth: DatabaseConnection,
        config: Config,
    ) -> Self {
        Self {
            ops,
            stats,
            auth,
            config: Arc::new(config),
        }
    }
}

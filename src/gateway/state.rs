use std::sync::Arc;

use crate::account::Database;
use crate::user_auth::UserAuthService;

/// Gateway application state (shared)
///
/// Read-mostly, built once at startup: the store pool and the auth service
/// (which holds the signing secret). Both are injected here rather than
/// looked up ambiently, so handlers and middleware are testable with fakes.
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL account store
    pub db: Arc<Database>,
    /// Credential and session service
    pub user_auth: Arc<UserAuthService>,
}

impl AppState {
    pub fn new(db: Arc<Database>, user_auth: Arc<UserAuthService>) -> Self {
        Self { db, user_auth }
    }
}

use std::sync::Arc;

use taskhive_core::{AccountNotifier, ProjectStore, TokenStore, UserStore};

use crate::auth::jwt::JwtConfig;

/// Shared state behind every route: the four ports plus the JWT
/// configuration. Stores are trait objects so the same router serves the
/// in-memory wiring in tests and Postgres/Redis in production.
#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<dyn UserStore>,
    pub token_store: Arc<dyn TokenStore>,
    pub project_store: Arc<dyn ProjectStore>,
    pub notifier: Arc<dyn AccountNotifier>,
    pub jwt: JwtConfig,
}

impl AppState {
    pub fn new<U, T, P, N>(
        user_store: U,
        token_store: T,
        project_store: P,
        notifier: N,
        jwt: JwtConfig,
    ) -> Self
    where
        U: UserStore + 'static,
        T: TokenStore + 'static,
        P: ProjectStore + 'static,
        N: AccountNotifier + 'static,
    {
        Self {
            user_store: Arc::new(user_store),
            token_store: Arc::new(token_store),
            project_store: Arc::new(project_store),
            notifier: Arc::new(notifier),
            jwt,
        }
    }
}

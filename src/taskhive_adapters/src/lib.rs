pub mod auth;
pub mod config;
pub mod email;
pub mod http;
pub mod persistence;

pub use crate::auth::jwt::{Claims, JwtConfig, TokenAuthError};
pub use crate::config::{AllowedOrigins, Settings};
pub use crate::email::{AuthEmailNotifier, MockEmailClient, PostmarkEmailClient, SentEmail};
pub use crate::http::{ApiError, AppState, AuthenticatedUser};
pub use crate::persistence::{
    HashMapProjectStore, HashMapTokenStore, HashMapUserStore, PostgresProjectStore,
    PostgresUserStore, RedisTokenStore,
};

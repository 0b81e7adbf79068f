pub mod settings;

pub use settings::{
    AllowedOrigins, ApplicationSettings, AuthSettings, DatabaseSettings, EmailClientSettings,
    RedisSettings, Settings,
};

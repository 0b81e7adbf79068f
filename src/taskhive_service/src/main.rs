use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use redis::Client;
use reqwest::Client as HttpClient;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use taskhive_adapters::{
    AuthEmailNotifier, JwtConfig, PostgresProjectStore, PostgresUserStore, PostmarkEmailClient,
    RedisTokenStore, Settings,
};
use taskhive_core::Email;
use taskhive_service::TaskhiveService;
use tokio::sync::Mutex;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    dotenvy::dotenv().ok();
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    let config = Settings::load()?;

    // Setup database connection pool
    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(config.database.url.expose_secret())
        .await?;

    // Run migrations
    sqlx::migrate!().run(&pg_pool).await?;

    // Setup Redis connection
    let redis_client = Client::open(config.redis.url.as_str())?;
    let redis_conn = Arc::new(Mutex::new(redis_client.get_connection()?));

    // Create stores
    let user_store = PostgresUserStore::new(pg_pool.clone());
    let project_store = PostgresProjectStore::new(pg_pool);
    let token_store = RedisTokenStore::new(
        redis_conn,
        config.auth.verification_token_ttl_in_seconds,
    );

    // Create email client and notifier
    let http_client = HttpClient::builder()
        .timeout(Duration::from_millis(config.email_client.timeout_in_millis))
        .build()?;

    let email_client = PostmarkEmailClient::new(
        config.email_client.base_url.clone(),
        Email::parse(&config.email_client.sender)?,
        config.email_client.auth_token.clone(),
        http_client,
    );
    let notifier = AuthEmailNotifier::new(email_client, config.application.frontend_url.clone());

    let jwt = JwtConfig {
        jwt_secret: config.auth.jwt_secret.clone(),
        token_ttl_in_seconds: config.auth.jwt_ttl_in_seconds,
    };

    // Assemble and run the service
    let service = TaskhiveService::new(user_store, token_store, project_store, notifier, jwt);

    let address = format!(
        "{}:{}",
        config.application.host, config.application.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await?;

    let allowed_origins = (!config.application.allowed_origins.is_empty())
        .then(|| config.application.allowed_origins.clone());

    service.run(listener, allowed_origins).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}

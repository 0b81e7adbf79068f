use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::get,
};
use taskhive_adapters::{
    AppState, JwtConfig,
    config::AllowedOrigins,
    http::routes::{auth_router, projects_router},
};
use taskhive_core::{AccountNotifier, ProjectStore, TokenStore, UserStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::request_trace::{make_span_with_request_id, on_request, on_response};

/// The assembled task-management service: account lifecycle under
/// `/api/auth`, the project aggregate under `/api/projects`, and a bare
/// health route at `/`.
pub struct TaskhiveService {
    router: Router,
}

impl TaskhiveService {
    /// Wire the service with the provided stores and notifier. Stores
    /// share state through their internal `Arc`s, so cloning in tests is
    /// cheap.
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
        let state = AppState::new(user_store, token_store, project_store, notifier, jwt);

        let router = Router::new()
            .route("/", get(health))
            .nest("/api/auth", auth_router())
            .nest("/api/projects", projects_router())
            .with_state(state);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self
            .router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_span_with_request_id)
                    .on_request(on_request)
                    .on_response(on_response),
            )
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));
        self
    }

    /// Convert the service into a plain router, optionally fencing it
    /// with a CORS allowlist, so it can be mounted into a larger app.
    pub fn into_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                ])
                .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the service as a standalone server on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("TaskHive listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}

async fn health() -> &'static str {
    "OK"
}

mod core;
mod features;
mod shared;

use crate::core::config::{AppConfig, AuthConfig, Config};
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::artists::ArtistService;
use crate::features::auth::routes as auth_routes;
use crate::features::auth::services::{AuthService, TokenService};
use crate::features::exports::{routes as exports_routes, ExportService};
use crate::features::lookups::{routes as lookups_routes, LookupService};
use crate::features::statistics::{routes as statistics_routes, StatisticsService};
use crate::features::supervisions::{routes as supervisions_routes, SupervisionService};
use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Services shared by the request handlers
pub struct AppServices {
    pub tokens: Arc<TokenService>,
    pub auth: Arc<AuthService>,
    pub lookups: Arc<LookupService>,
    pub supervisions: Arc<SupervisionService>,
    pub exports: Arc<ExportService>,
    pub statistics: Arc<StatisticsService>,
}

impl AppServices {
    pub fn new(pool: PgPool, auth_config: &AuthConfig) -> Self {
        let tokens = Arc::new(TokenService::new(auth_config));
        let auth = Arc::new(AuthService::new(pool.clone(), Arc::clone(&tokens)));

        let artists = Arc::new(ArtistService::new(pool.clone()));
        let lookups = Arc::new(LookupService::new(pool.clone(), Arc::clone(&artists)));
        let supervisions = Arc::new(SupervisionService::new(pool.clone(), artists));
        let exports = Arc::new(ExportService::new(Arc::clone(&supervisions)));
        let statistics = Arc::new(StatisticsService::new(pool));

        Self {
            tokens,
            auth,
            lookups,
            supervisions,
            exports,
            statistics,
        }
    }
}

/// API routes mounted under the build-mode prefix, with the health check and
/// the request-scoped layers (request id, tracing, CORS, body limit)
pub fn app(services: &AppServices, config: &AppConfig) -> Router {
    // Protected routes (require a valid access token)
    let protected_routes = Router::new()
        .merge(auth_routes::protected_routes(Arc::clone(&services.auth)))
        .merge(lookups_routes::routes(Arc::clone(&services.lookups)))
        .merge(supervisions_routes::routes(Arc::clone(
            &services.supervisions,
        )))
        .merge(exports_routes::routes(Arc::clone(&services.exports)))
        .merge(statistics_routes::routes(Arc::clone(&services.statistics)))
        .route_layer(axum::middleware::from_fn_with_state(
            Arc::clone(&services.tokens),
            middleware::auth_middleware,
        ));

    // Public routes (no auth required)
    let public_routes = Router::new().merge(auth_routes::public_routes(Arc::clone(&services.auth)));

    let api = Router::new().merge(protected_routes).merge(public_routes);

    let api = match config.api_prefix() {
        "" => api,
        prefix => Router::new().nest(prefix, api),
    };

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }

    api.route("/health", axum::routing::get(health_check)).layer(
        ServiceBuilder::new()
            // Generate X-Request-Id using UUID v7 (or use client-provided one)
            .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(middleware::MakeSpanWithRequestId)
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            // Propagate X-Request-Id to response headers
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(middleware::cors_layer(config.cors_allowed_origins.clone()))
            .layer(DefaultBodyLimit::max(config.max_request_body_size)),
    )
}

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    tracing::info!(
        "Configuration loaded: tokio_worker_threads={}, api_prefix='{}', pid={}",
        worker_threads,
        config.app.api_prefix(),
        std::process::id()
    );

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    database::run_migrations(&pool).await?;

    let services = AppServices::new(pool, &config.auth);
    tracing::info!(
        "Services initialized (access token ttl: {} days)",
        config.auth.access_token_ttl_days
    );

    // Build swagger router with dynamic info
    let swagger_modifier = SwaggerInfoModifier {
        title: config.swagger.title.clone(),
        version: config.swagger.version.clone(),
        description: config.swagger.description.clone(),
    };

    let mut openapi = ApiDoc::openapi();
    swagger_modifier.modify(&mut openapi);

    let swagger = if let Some(credentials) = config.swagger.credentials() {
        tracing::info!("Swagger UI basic auth enabled");
        Router::new()
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
            .layer(from_fn(middleware::basic_auth_middleware(Arc::new(
                credentials,
            ))))
    } else {
        tracing::info!("Swagger UI basic auth disabled (no credentials configured)");
        Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
    };

    let router = Router::new()
        .merge(swagger)
        .merge(app(&services, &config.app));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nodelay(true)?;

    let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
    socket.set_tcp_keepalive(&keepalive)?;

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on http://{}{}", addr, config.app.api_prefix());
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, router).await?;

    Ok(())
}

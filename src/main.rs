mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::openapi::{ApiDoc, SwaggerInfoModifier};
use crate::core::{database, middleware};
use crate::features::auth::{self, TokenVerifier};
use crate::features::events::routes as events_routes;
use crate::features::follows::{routes as follows_routes, FollowService, PgFollowRepository};
use crate::features::marketplace::{
    routes as marketplace_routes, ListingService, PgListingRepository,
};
use crate::features::messages::{routes as messages_routes, MessageService, PgMessageRepository};
use crate::features::posts::{routes as posts_routes, PgPostRepository, PostService};
use crate::features::profiles::{routes as profiles_routes, PgProfileRepository, ProfileService};
use crate::features::projects::{routes as projects_routes, PgProjectRepository, ProjectService};
use crate::modules::invalidation::ViewInvalidator;
use axum::{extract::DefaultBodyLimit, middleware::from_fn, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::Modify;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

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

    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    tracing::info!("Running database migrations...");
    database::run_migrations(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Auth: tokens are issued by the provider, we only verify them
    let jwks_client = Arc::new(auth::JwksClient::new(
        &config.auth.jwks_url,
        config.auth.jwks_cache_ttl,
    ));
    let token_verifier: Arc<dyn TokenVerifier> = Arc::new(auth::JwtValidator::new(
        jwks_client,
        config.auth.issuer.clone(),
        config.auth.audience.clone(),
        config.auth.jwt_leeway,
    ));
    tracing::info!("Auth configuration initialized (JWKS: {})", config.auth.jwks_url);

    // Repositories
    let profile_repository = Arc::new(PgProfileRepository::new(pool.clone()));
    let follow_repository = Arc::new(PgFollowRepository::new(pool.clone()));
    let post_repository = Arc::new(PgPostRepository::new(pool.clone()));
    let message_repository = Arc::new(PgMessageRepository::new(pool.clone()));
    let project_repository = Arc::new(PgProjectRepository::new(pool.clone()));
    let listing_repository = Arc::new(PgListingRepository::new(pool.clone()));

    let view_invalidator = Arc::new(ViewInvalidator::default());

    let profile_service = Arc::new(ProfileService::new(profile_repository.clone()));
    tracing::info!("Profile service initialized");

    let follow_service = Arc::new(FollowService::new(
        follow_repository.clone(),
        profile_repository.clone(),
        Arc::clone(&view_invalidator),
    ));
    tracing::info!("Follow service initialized");

    let post_service = Arc::new(PostService::new(
        post_repository,
        follow_repository,
        profile_repository.clone(),
        Arc::clone(&view_invalidator),
    ));
    tracing::info!("Post service initialized");

    let message_service = Arc::new(MessageService::new(
        message_repository,
        profile_repository,
        Arc::clone(&view_invalidator),
    ));
    tracing::info!("Message service initialized");

    let project_service = Arc::new(ProjectService::new(
        project_repository,
        Arc::clone(&view_invalidator),
    ));
    tracing::info!("Project service initialized");

    let listing_service = Arc::new(ListingService::new(
        listing_repository,
        Arc::clone(&view_invalidator),
    ));
    tracing::info!("Marketplace service initialized");

    // Build application router with dynamic swagger config
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

    // Every API route sees a Session; handlers decide whether it must be authenticated
    let api_routes = Router::new()
        .merge(messages_routes::routes(message_service))
        .merge(events_routes::routes(view_invalidator))
        .merge(profiles_routes::routes(profile_service))
        .merge(follows_routes::routes(follow_service))
        .merge(posts_routes::routes(post_service))
        .merge(projects_routes::routes(project_service))
        .merge(marketplace_routes::routes(listing_service))
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        .route_layer(axum::middleware::from_fn_with_state(
            token_verifier,
            middleware::session_middleware,
        ));

    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    let app = Router::new()
        .merge(swagger)
        .merge(api_routes)
        .merge(health_route)
        .layer(middleware::cors_layer(
            config.app.cors_allowed_origins.clone(),
        ))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    // SSE streams stay open; keepalive reaps dead peers
    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));
    tracing::info!(
        "Swagger UI available at {}",
        format!("http://{}/swagger-ui/", addr)
    );

    axum::serve(listener, app).await?;

    Ok(())
}

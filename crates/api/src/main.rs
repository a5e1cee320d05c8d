use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atelier_api::config::{ServerConfig, StorageBackend};
use atelier_api::state::AppState;
use atelier_api::{bootstrap, routes};
use atelier_storage::{LocalStorage, S3Storage, StorageProvider};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = config.port, "Configuration loaded");

    let pool = prepare_database().await;

    bootstrap::ensure_admin_account(&pool)
        .await
        .expect("Failed to bootstrap admin account");

    let storage = build_storage(&config).await;
    tracing::info!(backend = storage.name(), "Upload storage ready");

    let app = build_app(AppState::new(pool, config.clone(), storage), &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Shutdown complete");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify, and migrate. Any failure here aborts startup.
async fn prepare_database() -> PgPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = atelier_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    atelier_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    atelier_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database ready");
    pool
}

/// Assemble routes and the middleware stack (layers apply bottom-up: request
/// ID first, then tracing, timeout, and panic recovery outermost).
fn build_app(state: AppState, config: &ServerConfig) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let mut app = Router::new()
        // Health and the server-rendered pages sit at root level; everything
        // else is versioned under /api/v1.
        .merge(routes::health::router())
        .merge(routes::page::router())
        .nest("/api/v1", routes::api_routes());

    // The local backend serves its own uploads; S3 objects are served from
    // the bucket's public URL instead.
    if config.storage.backend == StorageBackend::Local {
        app = app.nest_service("/uploads", ServeDir::new(config.storage.upload_dir.clone()));
    }

    app.layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(build_cors_layer(config))
        .with_state(state)
}

/// Select the upload backend from configuration.
async fn build_storage(config: &ServerConfig) -> Arc<dyn StorageProvider> {
    match config.storage.backend {
        StorageBackend::Local => Arc::new(LocalStorage::new(
            config.storage.upload_dir.clone(),
            config.storage.public_base_url.clone(),
        )),
        StorageBackend::S3 => {
            // ServerConfig::from_env already rejected a missing bucket/URL.
            let bucket = config
                .storage
                .s3_bucket
                .clone()
                .expect("S3_BUCKET must be set when STORAGE_BACKEND=s3");
            let public_url = config
                .storage
                .s3_public_url
                .clone()
                .expect("S3_PUBLIC_URL must be set when STORAGE_BACKEND=s3");
            Arc::new(S3Storage::from_env(bucket, public_url).await)
        }
    }
}

/// Browser clients are the admin SPA and the public site; both send
/// credentials, so origins must be listed explicitly. A bad origin string is
/// a configuration error and panics at startup.
fn build_cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<_> = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse()
                .unwrap_or_else(|e| panic!("Invalid CORS origin '{origin}': {e}"))
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Resolve on SIGINT or, on Unix, SIGTERM, so the server drains cleanly
/// whether stopped from a terminal or by a process manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("SIGINT received, draining"),
        () = terminate => tracing::info!("SIGTERM received, draining"),
    }
}

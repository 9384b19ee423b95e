use std::net::SocketAddr;
use std::sync::Arc;

use rentwise_api::auth::jwt::fetch_jwks;
use rentwise_api::config::ServerConfig;
use rentwise_api::router::build_app_router;
use rentwise_api::state::AppState;
use rentwise_cloud::{NominatimGeocoder, S3PhotoStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rentwise_api=debug,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // --- Configuration ---
    let mut config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    if let Some(cognito) = config.jwt.cognito.clone() {
        let jwks = fetch_jwks(&cognito)
            .await
            .expect("Failed to fetch the Cognito signing keys");
        tracing::info!(issuer = %cognito.issuer(), keys = jwks.keys.len(), "Cognito signing keys loaded");
        config.jwt.jwks = Some(jwks);
    }
    if config.jwt.secret.is_some() {
        tracing::warn!("JWT_SECRET is set: HS256 tokens are accepted");
    }

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = rentwise_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    rentwise_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    rentwise_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Integrations ---
    let photo_store = S3PhotoStore::from_config(&config.storage).await;
    tracing::info!(bucket = %config.storage.bucket, region = %config.storage.region, "S3 photo store ready");

    let geocoder =
        NominatimGeocoder::new(&config.geocoding).expect("Failed to build geocoding client");
    tracing::info!(url = %config.geocoding.base_url, "Geocoder ready");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        photo_store: Arc::new(photo_store),
        geocoder: Arc::new(geocoder),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or SIGTERM on Unix.
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

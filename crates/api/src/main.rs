use std::net::SocketAddr;
use std::sync::Arc;

use clubdir_api::auth::accounts::create_user_if_absent;
use clubdir_api::config::ServerConfig;
use clubdir_api::router::build_app_router;
use clubdir_api::state::AppState;
use clubdir_db::store::PgClubStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "clubdir_api=debug,clubdir_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        upload_dir = %config.upload_dir.display(),
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = clubdir_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    clubdir_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    clubdir_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Default operator account ---
    match &config.default_admin_password {
        Some(password) => {
            let username = &config.default_admin_username;
            match create_user_if_absent(&pool, username, password).await {
                Ok(true) => tracing::info!(%username, "Default admin account created"),
                Ok(false) => tracing::debug!(%username, "Default admin account already exists"),
                Err(e) => panic!("Failed to bootstrap default admin account: {e}"),
            }
        }
        None => tracing::info!("DEFAULT_ADMIN_PASSWORD not set, skipping admin bootstrap"),
    }

    // --- Upload spool directory ---
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .expect("Failed to create upload directory");

    // --- App state ---
    let state = AppState {
        store: Arc::new(PgClubStore::new(pool.clone())),
        pool,
        config: Arc::new(config.clone()),
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

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
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

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use tracing::{error, info, warn};

use learnx_api::{create_router, AppState};
use learnx_core::{AuthService, UserRepository};
use learnx_infrastructure::{create_pool, run_migrations, PgUserRepository};
use learnx_security::JwtService;
use learnx_shared::{telemetry, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env first)
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry
    let _log_guard = telemetry::init_telemetry(&config.log)?;

    info!(env = %config.app.env, "LearnX auth server starting...");
    if config.is_production() && config.jwt.secret.len() < 32 {
        warn!("jwt.secret is shorter than 32 bytes");
    }

    // Connect to Database
    info!("Connecting to database...");
    let pool = create_pool(&config.database)
        .await
        .context("database connection failed")?;
    run_migrations(&pool).await.context("migrations failed")?;
    info!("Database connection established.");

    // Wire services
    let user_repo: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
    let jwt = JwtService::with_issuer(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
        &config.jwt.issuer,
    );
    let state = AppState::new(AuthService::new(user_repo, jwt));

    let allowed_origin: HeaderValue = config
        .cors
        .allowed_origin
        .parse()
        .context("cors.allowed_origin is not a valid header value")?;
    let app = create_router(state, allowed_origin);

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    info!("Closing database pool...");
    pool.close().await;

    if let Err(e) = served {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}

//! catalog 服务入口

use std::net::SocketAddr;
use std::sync::Arc;

use adapter_postgres::{MigrationManager, PostgresConfig, ping};
use config::AppConfig;
use secrecy::ExposeSecret;
use telemetry::{LogFormat, init_tracing};
use tracing::info;

use catalog::api::{AppState, app, cors_layer};
use catalog::infrastructure::persistence::{PostgresProductRepository, migrations};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load("config")?;

    let format = if config.is_production() {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    init_tracing(&config.telemetry.log_level, format);

    info!(app = %config.app_name, env = %config.app_env, "Starting catalog service");

    let pool = PostgresConfig::new(config.database.url.expose_secret())
        .with_max_connections(config.database.max_connections)
        .connect()
        .await?;
    ping(&pool).await?;

    let applied = MigrationManager::new(pool.clone())
        .migrate(&migrations())
        .await?;
    info!(applied, "Database schema up to date");

    let state = AppState {
        products: Arc::new(PostgresProductRepository::new(pool)),
    };

    let mut router = app(state);
    if let Some(cors) = cors_layer(&config.cors) {
        router = router.layer(cors);
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// 等待 SIGINT / SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

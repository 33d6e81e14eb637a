use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use persistence::{InMemoryStudentStore, StudentRepository, StudentStore};
use student_registry_api::{
    app,
    config::{self, StoreBackend},
    middleware,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let config = config::Config::load()?;

    middleware::logging::init_logging(&config.logging)?;
    middleware::init_metrics()?;

    info!("Starting Student Registry API v{}", env!("CARGO_PKG_VERSION"));

    let store = create_store(&config.database).await?;

    let addr = config.socket_addr()?;
    let app = app::create_app(config, store);

    info!("Server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn create_store(database: &config::DatabaseConfig) -> Result<Arc<dyn StudentStore>> {
    match database.backend {
        StoreBackend::Postgres => {
            let pool = persistence::db::create_pool(&database.pool_config()).await?;

            if database.run_migrations {
                info!("Running database migrations...");
                persistence::db::run_migrations(&pool).await?;
                info!("Migrations completed");
            }

            Ok(Arc::new(StudentRepository::new(pool)))
        }
        StoreBackend::Memory => {
            info!("Using in-memory student store; data is lost on shutdown");
            Ok(Arc::new(InMemoryStudentStore::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}

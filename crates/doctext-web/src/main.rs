use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use doctext_core::config_file;
use doctext_ingest::Extractors;
use doctext_web::{AppState, ServerSettings, create_router};

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,doctext_web=debug"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = config_file::load_config();
    let settings = ServerSettings::resolve(&config)?;

    std::fs::create_dir_all(&settings.temp_dir)?;
    let state = Arc::new(AppState::new(
        Extractors::default(),
        settings.temp_dir.clone(),
    ));

    let app = create_router(state, settings.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind((settings.host.as_str(), settings.port)).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        temp_dir = %settings.temp_dir.display(),
        max_upload_bytes = settings.max_upload_bytes,
        "listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

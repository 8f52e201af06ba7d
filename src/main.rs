use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use wellness_profile::adapters::auth::OidcSessionValidator;
use wellness_profile::adapters::gateway::HttpProfileGateway;
use wellness_profile::adapters::http::{build_router, AppServices};
use wellness_profile::adapters::speech::UnconfiguredTranscriber;
use wellness_profile::application::ProfileAggregator;
use wellness_profile::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let validator = OidcSessionValidator::new(config.auth.oidc())?;
    let gateway = HttpProfileGateway::new(config.gateway.http())?;

    let app = build_router(AppServices {
        validator: Arc::new(validator),
        aggregator: Arc::new(ProfileAggregator::new(Arc::new(gateway))),
        transcriber: Arc::new(UnconfiguredTranscriber::new()),
        max_audio_bytes: config.upload.max_audio_bytes,
        cors_origins: config.server.cors_origins_list(),
        request_timeout: config.server.request_timeout(),
    });

    let address = config.server.socket_addr()?;
    let listener = TcpListener::bind(address).await?;
    info!(%address, gateway = %config.gateway.base_url, "Server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

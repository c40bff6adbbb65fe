//! dnr-relay - contact form email relay for the DNR Transmissions website
//!
//! Receives contact-form submissions over HTTP and sends a lead notification
//! to the business plus a confirmation to the customer.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use dnr_common::config::ConfigLayers;
use dnr_relay::config::{ConfigOverrides, RelayConfig};
use dnr_relay::{build_router, AppState, ContactRelay, ResendTransport};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for dnr-relay
///
/// Each option can also come from the environment or the config file; the
/// command line wins.
#[derive(Parser, Debug)]
#[command(name = "dnr-relay")]
#[command(about = "Contact form email relay for the DNR Transmissions website")]
#[command(version)]
struct Args {
    /// Config file (default: ~/.config/dnr/config.toml, then /etc/dnr/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on [env: DNR_RELAY_PORT]
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to bind [env: DNR_RELAY_BIND]
    #[arg(long)]
    bind: Option<String>,

    /// Resend API key [env: RESEND_API_KEY]
    #[arg(long)]
    api_key: Option<String>,

    /// From header for outbound mail [env: DNR_FROM_ADDRESS]
    #[arg(long)]
    from_address: Option<String>,

    /// Inbox receiving lead notifications [env: DNR_BUSINESS_ADDRESS]
    #[arg(long)]
    business_address: Option<String>,

    /// Email provider base URL [env: DNR_RESEND_BASE_URL]
    #[arg(long)]
    resend_base_url: Option<String>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_key: self.api_key.clone(),
            port: self.port,
            bind: self.bind.clone(),
            from_address: self.from_address.clone(),
            business_address: self.business_address.clone(),
            resend_base_url: self.resend_base_url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dnr_relay=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Build identification first, before anything can fail
    info!(
        "Starting DNR contact relay (dnr-relay) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let layers = match &args.config {
        Some(path) => ConfigLayers::from_process_env()
            .with_file(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => ConfigLayers::from_process_env().with_default_file("dnr"),
    };
    if let Some(path) = layers.file_path() {
        info!("Config file: {}", path.display());
    }

    let config = RelayConfig::resolve(&args.overrides(), &layers).context("Invalid configuration")?;
    info!("Lead notifications go to {}", config.business_address);

    let transport = ResendTransport::with_base_url(config.api_key.clone(), &config.resend_base_url)
        .context("Failed to initialize email transport")?;
    info!("Email provider endpoint: {}", transport.endpoint());

    let relay = ContactRelay::new(config.relay_settings(), Arc::new(transport));
    let app = build_router(AppState::new(relay));

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("dnr-relay listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}

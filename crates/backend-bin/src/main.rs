use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokengate_backend::{
    config::{LogFormat, LoggingSettings, Settings},
    create_router, AppState,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Token-based authentication gate for a web API
#[derive(Parser, Debug)]
#[command(name = "tokengate", version, about)]
struct Args {
    /// Configuration file; defaults to config/default.toml and config/local.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind, overriding the configuration
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding the configuration
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::load().context("loading settings")?,
    };
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }

    init_tracing(&settings.logging);

    if settings.auth.uses_default_secret() {
        tracing::warn!("using the built-in development secret key; set auth.secret_key");
    }

    let addr = (settings.server.host.clone(), settings.server.port);
    let state = Arc::new(AppState::new(settings)?);
    let app = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}:{}", addr.0, addr.1))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// `RUST_LOG` wins over the configured level
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.to_lowercase()));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

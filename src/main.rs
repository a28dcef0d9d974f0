use std::net::SocketAddr;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use table_order::{
    config::{AppConfig, Environment},
    routes::app,
    state::AppState,
    store::Backend,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing(config.environment);

    let backend = Backend::connect(&config.storage).await?;
    tracing::info!(backend = backend.kind(), "storage ready");

    let state = AppState::new(backend.clone(), config.environment).await?;
    install_panic_hook(state.shutdown.clone());

    let router = app(state.clone(), &config.cors_origins);

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(environment = config.environment.as_str(), "listening on {}", addr);

    let shutdown = state.shutdown.clone();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            shutdown_signal().await;
            shutdown.cancel();
        }
    });

    let server = axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await });

    let mut server = std::pin::pin!(server.into_future());
    tokio::select! {
        result = &mut server => result?,
        _ = state.shutdown.cancelled() => {
            // Give in-flight requests and sockets a bounded window to finish.
            match tokio::time::timeout(config.shutdown_timeout, &mut server).await {
                Ok(result) => result?,
                Err(_) => tracing::warn!(
                    timeout_secs = config.shutdown_timeout.as_secs(),
                    "graceful shutdown timed out, closing anyway"
                ),
            }
        }
    }

    backend.close().await;
    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(environment: Environment) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,table_order=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    match environment {
        Environment::Production => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        Environment::Development => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// A panic anywhere starts an orderly shutdown instead of leaving a half-dead server.
fn install_panic_hook(shutdown: CancellationToken) {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "panic, shutting down");
        shutdown.cancel();
        default_hook(info);
    }));
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!("received SIGTERM, shutting down");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
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

//! Player league binary entrypoint wiring the HTTP API over the configured player store.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use player_league::{
    config::{AppConfig, StoreBackend},
    dao::player_store::{FileSystemPlayerStore, InMemoryPlayerStore, PlayerStore},
    routes,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let store = open_store(&config)?;
    let app = build_router(AppState::new(store));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Build the player store selected by the configuration.
fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn PlayerStore>> {
    let store: Arc<dyn PlayerStore> = match config.backend {
        StoreBackend::File => {
            let store = FileSystemPlayerStore::from_path(&config.database_path).with_context(
                || {
                    format!(
                        "problem creating file system player store at {}",
                        config.database_path.display()
                    )
                },
            )?;
            Arc::new(store)
        }
        StoreBackend::Memory => {
            info!("using in-memory player store; wins will not survive a restart");
            Arc::new(InMemoryPlayerStore::new())
        }
    };
    Ok(store)
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

mod config;
mod events;
mod markup;
mod routes;
mod state;
mod store;

use anyhow::Result;
use gencal_core::DateFieldResolver;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::events::DEADLINE_TYPE;
use crate::state::AppState;
use crate::store::{Seed, Store};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load()?;
    init_tracing(&config.log_level)?;

    let seed = match &config.data_file {
        Some(path) => Seed::load(path)?,
        None => {
            tracing::warn!("no data_file configured, starting with an empty store");
            Seed::default()
        }
    };

    // Deadlines carry both a creation and a due date-time; show them on the due date.
    let mut resolver = DateFieldResolver::new();
    resolver.register(DEADLINE_TYPE, "due");

    let store = Store::from_seed(seed, resolver)?;
    tracing::info!(
        calendars = store.groups().len(),
        records = store.record_count(),
        "store loaded"
    );

    let addr = config.addr();
    let state = AppState::new(store, config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "gencal-server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| anyhow::anyhow!("invalid log level '{}': {}", level, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

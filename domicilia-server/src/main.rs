use anyhow::Context;
use std::sync::Arc;

// ri-utilizziamo le funzioni e strutture definite in lib.rs
use domicilia_server::{init_tracing, open_database, routes, AppState, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env è opzionale
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = ServerConfig::from_env().context("read server configuration")?;

    // Un database irraggiungibile viene solo loggato: il server parte comunque.
    let pool = match open_database(&config.database_url).await {
        Ok(pool) => {
            tracing::info!("database connected");
            Some(pool)
        }
        Err(e) => {
            tracing::error!("database connection error: {:#}", e);
            None
        }
    };

    let state = Arc::new(AppState::new(pool));
    let app = routes::router(state);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind tcp listener")?;
    tracing::info!("listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("server shutdown")?;

    Ok(())
}

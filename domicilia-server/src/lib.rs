use anyhow::Context;
use axum::http::StatusCode;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::{Path, PathBuf};

pub mod config;
pub mod controllers;
pub mod routes;
pub mod store;

pub use config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    /// None quando il database non era raggiungibile all'avvio: il server parte comunque
    /// e le rotte che richiedono storage rispondono 503.
    pub pool: Option<SqlitePool>,
}

impl AppState {
    pub fn new(pool: Option<SqlitePool>) -> Self {
        Self { pool }
    }
}

// Dato un percorso di file, restituisce un URL SQLite valido. Crea le directory genitrici se non esistono.
pub fn sqlite_url_for_path(p: &Path) -> anyhow::Result<String> {
    let abs = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent dirs for {:?}", parent))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&abs)
        .with_context(|| format!("create/open sqlite file {:?}", abs))?;
    let s = abs.to_string_lossy().replace('\\', "/");
    // sqlx toglie "sqlite://": un path assoluto unix mantiene il suo "/" iniziale
    Ok(format!("sqlite://{}", s))
}

/// Normalizza un DATABASE_URL grezzo in un URL SQLite.
/// "sqlite::memory:" passa invariato, "sqlite://" viene rimosso per ottenere il percorso del file.
pub fn sqlite_url_from(raw: &str) -> anyhow::Result<String> {
    if raw == "sqlite::memory:" {
        return Ok(raw.to_string());
    }
    let path_part = raw.strip_prefix("sqlite://").unwrap_or(raw);
    sqlite_url_for_path(&PathBuf::from(path_part))
}

// Connect to the database and return a connection pool.
// Un database in memoria vive quanto la sua connessione: il pool ne tiene una sola, mai chiusa.
pub async fn connect_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
    let options = if db_url == "sqlite::memory:" {
        SqlitePoolOptions::new().max_connections(1).idle_timeout(None).max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };
    let pool = options
        .connect(db_url)
        .await
        .with_context(|| format!("connect to sqlite via {}", db_url))?;
    Ok(pool)
}

// Esegue le migrazioni del database. Crea le tabelle se non esistono.
pub async fn run_migrations(pool: &SqlitePool) -> anyhow::Result<()> {
    let stmts = [
        r#"
        CREATE TABLE IF NOT EXISTS messages (
            message_id  TEXT PRIMARY KEY,
            company_id  TEXT NOT NULL,
            name        TEXT NOT NULL,
            email       TEXT NOT NULL,
            phone       TEXT NOT NULL DEFAULT '',
            text        TEXT NOT NULL,
            sent_at     TEXT NOT NULL,
            received_at TEXT NOT NULL
        );"#,
        r#"
        CREATE INDEX IF NOT EXISTS idx_messages_company
            ON messages (company_id);"#,
    ];
    // applica ogni statement di migrazione
    for s in &stmts {
        sqlx::query(s)
            .execute(pool)
            .await
            .with_context(|| format!("apply migration: {}", &s[..s.len().min(40)].replace('\n', " ")))?;
    }
    Ok(())
}

/// Apre il database e applica le migrazioni. Un errore qui viene loggato dal chiamante
/// ma non impedisce l'avvio del server.
pub async fn open_database(raw_url: &str) -> anyhow::Result<SqlitePool> {
    let db_url = sqlite_url_from(raw_url).context("build sqlite DATABASE_URL")?;
    tracing::info!(%db_url, "using database");
    let pool = connect_pool(&db_url).await.context("connect to sqlite")?;
    run_migrations(&pool).await.context("run migrations")?;
    Ok(pool)
}

/// Controlla lo stato di salute del database tentando di acquisire una connessione dal pool.
pub async fn health_with_pool(pool: Option<&SqlitePool>) -> StatusCode {
    let Some(pool) = pool else {
        return StatusCode::SERVICE_UNAVAILABLE;
    };
    match pool.acquire().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Inizializza tracing su stdout. Livello di default INFO, override via RUST_LOG.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,domicilia_server=debug,tower_http=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).compact())
        .init();
}

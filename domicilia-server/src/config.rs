use anyhow::Context;
use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_BIND_HOST: &str = "127.0.0.1";
pub const DEFAULT_DATABASE_URL: &str = "domicilia.db";

/// Configurazione del server letta dall'ambiente, con fallback hardcoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_host: String,
    pub port: u16,
    pub database_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: DEFAULT_BIND_HOST.to_string(),
            port: DEFAULT_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl ServerConfig {
    /// Legge PORT, BIND_HOST e DATABASE_URL dal processo.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Come `from_env`, ma con una sorgente di variabili arbitraria (usata nei test).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().with_context(|| format!("parse PORT {:?}", raw))?,
            None => defaults.port,
        };
        Ok(Self {
            bind_host: lookup("BIND_HOST").unwrap_or(defaults.bind_host),
            port,
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.bind_host, self.port)
            .parse()
            .with_context(|| format!("parse bind address {}:{}", self.bind_host, self.port))
    }
}

use domicilia_core::{DEFAULT_API_URL, DEFAULT_COMPANY_ID, DEFAULT_COMPANY_NAME, MESSAGES_ENDPOINT};
use url::Url;

/// Configurazione centralizzata del widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    pub api_url: String,
    pub default_company_id: String,
    pub default_company_name: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            default_company_id: DEFAULT_COMPANY_ID.to_string(),
            default_company_name: DEFAULT_COMPANY_NAME.to_string(),
        }
    }
}

impl ChatConfig {
    /// Default, con l'URL dell'API sovrascrivibile via DOMICILIA_API_URL.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Come `from_env`, con una sorgente di variabili arbitraria. Un valore vuoto è ignorato.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup("DOMICILIA_API_URL") {
            if !url.trim().is_empty() {
                config.api_url = url.trim().to_string();
            }
        }
        config
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// `{api_url}/messages`, tollerando uno slash finale nella base.
    pub fn messages_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}{}", self.api_url.trim_end_matches('/'), MESSAGES_ENDPOINT))
    }
}

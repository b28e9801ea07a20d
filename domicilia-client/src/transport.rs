use async_trait::async_trait;
use domicilia_core::ContactMessage;
use reqwest::Client as HttpClient;
use serde_json::Value;
use url::Url;

use crate::{config::ChatConfig, error::TransportError};

/// Consegna di un messaggio all'endpoint di ingresso.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Una sola richiesta: niente retry, niente deduplica.
    async fn send(&self, message: &ContactMessage) -> Result<Value, TransportError>;
}

pub struct HttpTransport {
    http: HttpClient,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(config: &ChatConfig) -> Result<Self, TransportError> {
        Ok(Self::with_client(HttpClient::new(), config.messages_url()?))
    }

    pub fn with_client(http: HttpClient, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl MessageTransport for HttpTransport {
    async fn send(&self, message: &ContactMessage) -> Result<Value, TransportError> {
        // .json() imposta Content-Type: application/json
        let resp = self.http.post(self.endpoint.clone()).json(message).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = resp.bytes().await?;
        let ack = if body.is_empty() { Value::Null } else { serde_json::from_slice(&body)? };
        tracing::debug!(endpoint = %self.endpoint, status = status.as_u16(), "message sent");
        Ok(ack)
    }
}

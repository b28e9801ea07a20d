use serde::{Deserialize, Serialize};

/// Messaggio di contatto inviato dal widget all'endpoint di ingresso.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub text: String,
    pub name: String,
    pub email: String,
    /// Opzionale: stringa vuota se il mittente non lo fornisce.
    #[serde(default)]
    pub phone: String,
    pub company_id: String,
    pub timestamp: String, // RFC3339 UTC, generato dal client
}

/// Messaggio persistito dal server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessage {
    pub message_id: String,
    #[serde(flatten)]
    pub message: ContactMessage,
    pub received_at: String, // RFC3339 UTC, orologio del server
}

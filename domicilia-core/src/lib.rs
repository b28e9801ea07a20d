//! domicilia-core: tipi condivisi tra client e server (contratto del messaggio, DTO HTTP, errori,
//! validazione e costanti del widget). Niente I/O.

pub mod config;
pub mod error;
pub mod models;
pub mod protocol;
pub mod utils;
pub mod validation;

// Re-export utili per ridurre i percorsi nei crate client/server
pub use config::{DEFAULT_API_URL, DEFAULT_COMPANY_ID, DEFAULT_COMPANY_NAME, MESSAGES_ENDPOINT};
pub use error::Error;
pub use models::{message::ContactMessage, message::StoredMessage};
pub use protocol::http::{
    HealthResponse, ListMessagesQuery, ListMessagesResponse, MessageAck, WelcomeResponse,
};
pub use utils::{is_rfc3339, new_message_id, now_timestamp};
pub use validation::{validate_contact_message, MessageDraft, ValidDraft, ValidationError};

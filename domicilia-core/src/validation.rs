use serde::{Deserialize, Serialize};

use crate::models::ContactMessage;

pub const MAX_TEXT_CHARS: usize = 4096;
pub const MAX_FIELD_CHARS: usize = 256;

/// Motivo per cui un messaggio non può essere inviato o accettato.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("message text is empty")]
    EmptyText,
    #[error("name and email are required")]
    MissingContact,
    #[error("company identifier is empty")]
    EmptyCompany,
    #[error("field `{field}` exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Campi del form così come digitati dall'utente.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDraft {
    pub text: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Bozza che ha superato i controlli lato client; `text` è già trimmato.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub text: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl MessageDraft {
    pub fn new(text: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { text: text.into(), name: name.into(), email: email.into(), phone: String::new() }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Text is checked first: an empty message is ignored before the contact fields matter.
    pub fn validate(&self) -> Result<ValidDraft, ValidationError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        if self.name.trim().is_empty() || self.email.trim().is_empty() {
            return Err(ValidationError::MissingContact);
        }
        Ok(ValidDraft {
            text: text.to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        })
    }
}

impl ValidDraft {
    /// Costruisce il payload da inviare, con il timestamp dell'invio.
    pub fn into_message(self, company_id: impl Into<String>, timestamp: impl Into<String>) -> ContactMessage {
        ContactMessage {
            text: self.text,
            name: self.name,
            email: self.email,
            phone: self.phone,
            company_id: company_id.into(),
            timestamp: timestamp.into(),
        }
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Controlli applicati dall'endpoint di ingresso: gli stessi del client più
/// company id e limiti di lunghezza.
pub fn validate_contact_message(msg: &ContactMessage) -> Result<(), ValidationError> {
    if msg.text.trim().is_empty() {
        return Err(ValidationError::EmptyText);
    }
    if msg.name.trim().is_empty() || msg.email.trim().is_empty() {
        return Err(ValidationError::MissingContact);
    }
    if msg.company_id.trim().is_empty() {
        return Err(ValidationError::EmptyCompany);
    }
    check_len("text", &msg.text, MAX_TEXT_CHARS)?;
    check_len("name", &msg.name, MAX_FIELD_CHARS)?;
    check_len("email", &msg.email, MAX_FIELD_CHARS)?;
    check_len("phone", &msg.phone, MAX_FIELD_CHARS)?;
    check_len("companyId", &msg.company_id, MAX_FIELD_CHARS)?;
    Ok(())
}

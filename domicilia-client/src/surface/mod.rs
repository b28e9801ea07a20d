//! Superfici di presentazione: pagina inline, modale e bottone flottante.
//! Sono view-model senza rendering; il front end disegna a partire da `SurfaceView`.

use async_trait::async_trait;
use domicilia_core::MessageDraft;
use serde_json::Value;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::SessionError;

pub mod button;
mod form;
pub mod inline;
pub mod modal;
mod timer;

pub const ALERT_MISSING_CONTACT: &str = "Please fill in your name and email";

/// Campi del form di contatto.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    pub fn draft(&self) -> MessageDraft {
        MessageDraft {
            text: self.message.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::Message => &mut self.message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Message,
}

/// Tutto ciò che serve per disegnare una superficie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceView {
    pub company_id: String,
    pub open: bool,
    pub form: ContactForm,
    pub is_loading: bool,
    pub error: Option<String>,
    pub show_success: bool,
    /// Avviso bloccante (es. nome/email mancanti).
    pub alert: Option<String>,
    pub focused: Option<FormField>,
}

/// Esito di un submit esplicito del form.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Testo vuoto o superficie chiusa: nessuna richiesta.
    Ignored,
    /// Nome o email mancanti: alert mostrato, nessuna richiesta.
    Blocked,
    /// Un altro invio è già in corso.
    Busy,
    Sent(Value),
    /// L'errore generico è nello stato della sessione.
    Failed,
}

/// Capacità comuni alle superfici del form.
#[async_trait]
pub trait ContactSurface: Send + Sync {
    fn set_field(&self, field: FormField, value: &str);

    fn view(&self) -> Result<SurfaceView, SessionError>;

    /// Chiude l'alert bloccante.
    fn dismiss_alert(&self);

    async fn submit(&self) -> SubmitOutcome;
}

pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

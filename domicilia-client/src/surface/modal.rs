use async_trait::async_trait;
use std::{sync::Arc, time::Duration};

use super::{form::FormController, ContactSurface, FormField, SubmitOutcome, SurfaceView};
use crate::{error::SessionError, session::SessionHandle};

/// Dopo un invio riuscito il modale mostra il successo per questo tempo, poi si chiude.
pub const MODAL_SUCCESS_WINDOW: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Char(char),
}

/// Dove è avvenuto un click rispetto al dialogo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Backdrop,
    Dialog,
}

/// Modale di contatto sopra un backdrop.
pub struct ChatModal {
    controller: FormController,
    prop_company_id: Option<String>,
}

impl ChatModal {
    /// Un company id esplicito ha la precedenza e sovrascrive quello della sessione.
    pub fn new(session: SessionHandle, company_id: Option<String>) -> Result<Self, SessionError> {
        let prop_company_id = company_id.filter(|id| !id.trim().is_empty());
        if let Some(id) = &prop_company_id {
            if session.company_id()? != *id {
                session.set_company_id(id.clone())?;
            }
        }
        Ok(Self {
            controller: FormController::new(session, MODAL_SUCCESS_WINDOW, true),
            prop_company_id,
        })
    }

    /// Callback invocato a ogni chiusura effettiva (escape, backdrop, pulsante, auto-hide).
    pub fn with_on_close<F>(mut self, on_close: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.controller.set_on_close(Arc::new(on_close));
        self
    }

    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    /// Apre il modale con il focus sul campo messaggio.
    pub fn open(&self) {
        self.controller.open();
    }

    /// Returns true if the modal was open.
    pub fn close(&self) -> bool {
        self.controller.close()
    }

    pub fn toggle(&self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Escape chiude il modale solo se è aperto.
    pub fn handle_key(&self, key: Key) -> bool {
        match key {
            Key::Escape if self.is_open() => self.close(),
            _ => false,
        }
    }

    pub fn handle_click(&self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Backdrop => self.close(),
            ClickTarget::Dialog => false,
        }
    }

    pub fn active_company_id(&self) -> Result<String, SessionError> {
        match &self.prop_company_id {
            Some(id) => Ok(id.clone()),
            None => self.controller.session().company_id(),
        }
    }

    pub fn success_pending(&self) -> bool {
        self.controller.success_pending()
    }
}

#[async_trait]
impl ContactSurface for ChatModal {
    fn set_field(&self, field: FormField, value: &str) {
        self.controller.set_field(field, value);
    }

    fn view(&self) -> Result<SurfaceView, SessionError> {
        self.controller.view(self.active_company_id()?)
    }

    fn dismiss_alert(&self) {
        self.controller.dismiss_alert();
    }

    async fn submit(&self) -> SubmitOutcome {
        // il form non è visibile a modale chiuso
        if !self.is_open() {
            return SubmitOutcome::Ignored;
        }
        self.controller.submit(self.prop_company_id.as_deref()).await
    }
}

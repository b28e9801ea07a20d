use domicilia_core::{now_timestamp, MessageDraft};
use serde_json::Value;
use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{
    config::ChatConfig,
    error::{SessionError, SubmitError, TransportError},
    state::SubmissionState,
    transport::{HttpTransport, MessageTransport},
};

/// Stato condiviso della sessione, così come lo vedono le superfici.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub company_id: String,
    pub submission: SubmissionState,
}

struct SessionInner {
    state: watch::Sender<SessionSnapshot>,
    transport: Arc<dyn MessageTransport>,
    cancel: CancellationToken,
}

/// Radice dell'applicazione: possiede la sessione per tutta la sua vita.
/// Le superfici ricevono un `SessionHandle` e non possono allungarne la durata.
pub struct ChatShell {
    inner: Option<Arc<SessionInner>>,
}

impl ChatShell {
    pub fn mount(config: &ChatConfig, transport: Arc<dyn MessageTransport>) -> Self {
        tracing::info!(
            api_url = %config.api_url,
            default_company_id = %config.default_company_id,
            "chat session initialised"
        );
        let (state, _) = watch::channel(SessionSnapshot {
            company_id: config.default_company_id.clone(),
            submission: SubmissionState::default(),
        });
        let inner = SessionInner { state, transport, cancel: CancellationToken::new() };
        Self { inner: Some(Arc::new(inner)) }
    }

    /// Shell con il trasporto HTTP verso `config.api_url`.
    pub fn with_http(config: &ChatConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::mount(config, Arc::new(transport)))
    }

    pub fn session(&self) -> SessionHandle {
        let inner = self.inner.as_ref().map(Arc::downgrade).unwrap_or_default();
        SessionHandle { inner }
    }

    pub fn is_active(&self) -> bool {
        self.inner.is_some()
    }

    /// Cancels in-flight submissions and invalidates every handed-out handle.
    pub fn teardown(&mut self) {
        if let Some(inner) = self.inner.take() {
            inner.cancel.cancel();
            tracing::debug!("chat session torn down");
        }
    }
}

impl Drop for ChatShell {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Accesso iniettato alla sessione. Dopo il teardown della shell ogni operazione
/// fallisce con `SessionError::ShellInactive`.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Weak<SessionInner>,
}

impl SessionHandle {
    fn inner(&self) -> Result<Arc<SessionInner>, SessionError> {
        self.inner
            .upgrade()
            .filter(|inner| !inner.cancel.is_cancelled())
            .ok_or(SessionError::ShellInactive)
    }

    pub fn is_active(&self) -> bool {
        self.inner().is_ok()
    }

    pub fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        Ok(self.inner()?.state.borrow().clone())
    }

    /// Ricevitore per ridisegnare a ogni cambiamento di stato.
    pub fn subscribe(&self) -> Result<watch::Receiver<SessionSnapshot>, SessionError> {
        Ok(self.inner()?.state.subscribe())
    }

    pub fn company_id(&self) -> Result<String, SessionError> {
        Ok(self.inner()?.state.borrow().company_id.clone())
    }

    /// Sovrascrive il company id; nessuna notifica se il valore non cambia.
    pub fn set_company_id(&self, company_id: impl Into<String>) -> Result<(), SessionError> {
        let company_id = company_id.into();
        self.inner()?.state.send_if_modified(|s| {
            if s.company_id == company_id {
                return false;
            }
            tracing::debug!(from = %s.company_id, to = %company_id, "company id changed");
            s.company_id = company_id;
            true
        });
        Ok(())
    }

    /// Invia la bozza con il company id corrente. Al più un invio alla volta:
    /// un secondo invio durante `Submitting` viene rifiutato con `InFlight`.
    pub async fn submit(&self, draft: &MessageDraft) -> Result<Value, SubmitError> {
        self.submit_as(draft, None).await
    }

    /// Come `submit`, ma con il company id risolto dalla superficie che invia.
    /// `None` usa il valore corrente della sessione.
    pub async fn submit_as(&self, draft: &MessageDraft, company_id: Option<&str>) -> Result<Value, SubmitError> {
        let inner = self.inner()?;
        let valid = draft.validate()?;

        let mut tagged = String::new();
        let started = inner.state.send_if_modified(|s| {
            if !s.submission.begin() {
                return false;
            }
            tagged = company_id.map_or_else(|| s.company_id.clone(), str::to_string);
            true
        });
        if !started {
            tracing::warn!("submit rejected: a message is already in flight");
            return Err(SubmitError::InFlight);
        }
        let guard = InFlight { inner: &inner, done: false };

        let timestamp = now_timestamp();
        let message = valid.into_message(tagged, timestamp.clone());

        let outcome = tokio::select! {
            _ = inner.cancel.cancelled() => {
                tracing::debug!("submission cancelled by shell teardown");
                guard.finish();
                return Err(SubmitError::Cancelled);
            }
            res = inner.transport.send(&message) => res,
        };
        guard.finish();

        match outcome {
            Ok(ack) => {
                tracing::info!(company_id = %message.company_id, "message sent");
                inner.state.send_modify(|s| s.submission.succeed(message.text, timestamp));
                Ok(ack)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to send message");
                inner.state.send_modify(|s| s.submission.fail());
                Err(SubmitError::Failed)
            }
        }
    }
}

/// Riporta la sessione a Idle se il future di `submit` viene droppato a metà.
/// Dopo il teardown non tocca più lo stato.
struct InFlight<'a> {
    inner: &'a SessionInner,
    done: bool,
}

impl InFlight<'_> {
    fn finish(mut self) {
        self.done = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.done && !self.inner.cancel.is_cancelled() {
            self.inner.state.send_modify(|s| s.submission.abandon());
        }
    }
}

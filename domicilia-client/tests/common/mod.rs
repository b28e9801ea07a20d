#![allow(dead_code)]

use async_trait::async_trait;
use domicilia_client::{ContactMessage, MessageTransport, TransportError};
use serde_json::Value;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use tokio::sync::Notify;

/// Trasporto finto: registra i messaggi e risponde con un esito fisso.
/// Con `gated()` ogni invio resta in attesa finché il test non chiama `release()`.
pub struct StubTransport {
    pub sent: Mutex<Vec<ContactMessage>>,
    calls: AtomicUsize,
    fail_with: Option<u16>,
    reply: Value,
    gate: Option<Notify>,
    entered: Notify,
}

impl StubTransport {
    pub fn ok(reply: Value) -> Arc<Self> {
        Arc::new(Self::build(reply, None, None))
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self::build(Value::Null, Some(status), None))
    }

    pub fn gated(reply: Value) -> Arc<Self> {
        Arc::new(Self::build(reply, None, Some(Notify::new())))
    }

    fn build(reply: Value, fail_with: Option<u16>, gate: Option<Notify>) -> Self {
        Self { sent: Mutex::new(Vec::new()), calls: AtomicUsize::new(0), fail_with, reply, gate, entered: Notify::new() }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    /// Attende che un invio sia arrivato al trasporto.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }
}

#[async_trait]
impl MessageTransport for StubTransport {
    async fn send(&self, message: &ContactMessage) -> Result<Value, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().unwrap().push(message.clone());
        self.entered.notify_one();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match self.fail_with {
            Some(status) => Err(TransportError::Status(status)),
            None => Ok(self.reply.clone()),
        }
    }
}

use domicilia_core::ValidationError;

/// Errori del trasporto HTTP. Non arrivano mai all'utente: la sessione li logga
/// e li riduce a un messaggio generico.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid API url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("chat session used outside an active ChatShell")]
    ShellInactive,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Rifiutato localmente, nessuna transizione di stato.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("a message is already being sent")]
    InFlight,

    /// Errore generico: la causa è solo nei log.
    #[error("{}", crate::state::SUBMIT_FAILED_MESSAGE)]
    Failed,

    #[error("submission cancelled: the chat shell was torn down")]
    Cancelled,

    #[error(transparent)]
    Session(#[from] SessionError),
}

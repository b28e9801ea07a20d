//! domicilia-client: widget di contatto headless. Il rendering resta al front end che lo ospita;
//! qui vivono la sessione condivisa, la macchina a stati dell'invio e le superfici del form.

pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod surface;
pub mod transport;

pub use config::ChatConfig;
pub use error::{SessionError, SubmitError, TransportError};
pub use session::{ChatShell, SessionHandle, SessionSnapshot};
pub use state::{LastResult, SubmissionPhase, SubmissionState, SUBMIT_FAILED_MESSAGE};
pub use surface::{
    button::{ButtonOptions, ButtonPosition, ChatButton},
    inline::{InlinePage, INLINE_SUCCESS_WINDOW},
    modal::{ChatModal, ClickTarget, Key, MODAL_SUCCESS_WINDOW},
    ContactForm, ContactSurface, FormField, SubmitOutcome, SurfaceView, ALERT_MISSING_CONTACT,
};
pub use transport::{HttpTransport, MessageTransport};

// Re-export del contratto condiviso
pub use domicilia_core::{ContactMessage, MessageDraft, ValidationError};

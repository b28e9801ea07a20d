use super::modal::ChatModal;
use crate::{error::SessionError, session::SessionHandle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonPosition {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl ButtonPosition {
    /// Nomi in kebab-case; qualunque altro valore ricade su `BottomRight`.
    pub fn parse(name: &str) -> Self {
        match name {
            "bottom-left" => Self::BottomLeft,
            "top-right" => Self::TopRight,
            "top-left" => Self::TopLeft,
            _ => Self::BottomRight,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
            Self::TopRight => "top-right",
            Self::TopLeft => "top-left",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonOptions {
    pub company_id: Option<String>,
    pub position: ButtonPosition,
    pub label: String,
}

impl Default for ButtonOptions {
    fn default() -> Self {
        Self { company_id: None, position: ButtonPosition::default(), label: ChatButton::DEFAULT_LABEL.to_string() }
    }
}

/// Bottone flottante che apre il modale di contatto.
pub struct ChatButton {
    label: String,
    position: ButtonPosition,
    modal: ChatModal,
}

impl ChatButton {
    pub const DEFAULT_LABEL: &'static str = "Contact";
    pub const ARIA_LABEL: &'static str = "Open the chat";

    pub fn new(session: SessionHandle, options: ButtonOptions) -> Result<Self, SessionError> {
        let modal = ChatModal::new(session, options.company_id)?;
        Ok(Self { label: options.label, position: options.position, modal })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> ButtonPosition {
        self.position
    }

    pub fn click(&self) {
        self.modal.open();
    }

    pub fn modal(&self) -> &ChatModal {
        &self.modal
    }
}

use domicilia_core::ValidationError;
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use super::{lock, timer::DisplayTimer, ContactForm, FormField, SubmitOutcome, SurfaceView, ALERT_MISSING_CONTACT};
use crate::{
    error::{SessionError, SubmitError},
    session::SessionHandle,
};

pub(crate) type CloseCallback = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Default)]
pub(crate) struct FormState {
    pub(crate) form: ContactForm,
    pub(crate) open: bool,
    pub(crate) show_success: bool,
    pub(crate) alert: Option<String>,
    pub(crate) focused: Option<FormField>,
}

/// Logica comune a pagina e modale: campi, validazione, feedback e timer di successo.
pub(crate) struct FormController {
    session: SessionHandle,
    state: Arc<Mutex<FormState>>,
    timer: DisplayTimer,
    success_window: Duration,
    close_after_success: bool,
    on_close: Option<CloseCallback>,
}

impl FormController {
    pub(crate) fn new(session: SessionHandle, success_window: Duration, close_after_success: bool) -> Self {
        Self {
            session,
            state: Arc::new(Mutex::new(FormState::default())),
            timer: DisplayTimer::default(),
            success_window,
            close_after_success,
            on_close: None,
        }
    }

    pub(crate) fn session(&self) -> &SessionHandle {
        &self.session
    }

    pub(crate) fn set_on_close(&mut self, on_close: CloseCallback) {
        self.on_close = Some(on_close);
    }

    pub(crate) fn is_open(&self) -> bool {
        lock(&self.state).open
    }

    pub(crate) fn open(&self) {
        let mut s = lock(&self.state);
        s.open = true;
        s.focused = Some(FormField::Message);
    }

    /// Chiusura esplicita: annulla il timer di successo. Il callback scatta
    /// solo se la superficie era aperta.
    pub(crate) fn close(&self) -> bool {
        self.timer.cancel();
        lock(&self.state).show_success = false;
        close_shared(&self.state, self.on_close.as_ref())
    }

    pub(crate) fn set_field(&self, field: FormField, value: &str) {
        *lock(&self.state).form.field_mut(field) = value.to_string();
    }

    pub(crate) fn focus(&self, field: FormField) {
        lock(&self.state).focused = Some(field);
    }

    pub(crate) fn dismiss_alert(&self) {
        lock(&self.state).alert = None;
    }

    pub(crate) fn success_pending(&self) -> bool {
        self.timer.is_pending()
    }

    pub(crate) fn view(&self, company_id: String) -> Result<SurfaceView, SessionError> {
        let submission = self.session.snapshot()?.submission;
        let s = lock(&self.state);
        Ok(SurfaceView {
            company_id,
            open: s.open,
            form: s.form.clone(),
            is_loading: submission.is_loading,
            error: submission.error,
            show_success: s.show_success,
            alert: s.alert.clone(),
            focused: s.focused,
        })
    }

    /// `company_id` è l'override della superficie (prop o URL); senza, vale quello della sessione.
    pub(crate) async fn submit(&self, company_id: Option<&str>) -> SubmitOutcome {
        let draft = {
            let mut s = lock(&self.state);
            s.alert = None;
            s.form.draft()
        };
        match draft.validate() {
            Ok(_) => {}
            Err(ValidationError::EmptyText) => return SubmitOutcome::Ignored,
            Err(_) => {
                lock(&self.state).alert = Some(ALERT_MISSING_CONTACT.to_string());
                return SubmitOutcome::Blocked;
            }
        }

        match self.session.submit_as(&draft, company_id).await {
            Ok(ack) => {
                {
                    let mut s = lock(&self.state);
                    s.show_success = true;
                    s.form.message.clear();
                }
                self.arm_auto_hide();
                SubmitOutcome::Sent(ack)
            }
            Err(SubmitError::InFlight) => SubmitOutcome::Busy,
            Err(SubmitError::Invalid(_)) => SubmitOutcome::Blocked,
            Err(e) => {
                tracing::debug!("submit failed: {}", e);
                SubmitOutcome::Failed
            }
        }
    }

    fn arm_auto_hide(&self) {
        let state = Arc::clone(&self.state);
        let close = self.close_after_success;
        let on_close = self.on_close.clone();
        self.timer.schedule(self.success_window, move || {
            lock(&state).show_success = false;
            if close {
                close_shared(&state, on_close.as_ref());
            }
        });
    }
}

fn close_shared(state: &Mutex<FormState>, on_close: Option<&CloseCallback>) -> bool {
    let was_open = {
        let mut s = lock(state);
        s.focused = None;
        std::mem::replace(&mut s.open, false)
    };
    // callback fuori dal lock: può rileggere lo stato della superficie
    if was_open {
        if let Some(cb) = on_close {
            cb();
        }
    }
    was_open
}

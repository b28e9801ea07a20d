/// Unico messaggio d'errore mostrato all'utente, qualunque sia la causa.
pub const SUBMIT_FAILED_MESSAGE: &str = "Unable to send the message. Please try again later.";

/// Fase dell'unico invio attivo per sessione.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Snapshot dell'ultimo invio riuscito.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastResult {
    pub text: String,
    pub timestamp: String,
    pub success: bool,
    /// Cresce a ogni successo: due invii con lo stesso testo restano distinguibili.
    pub seq: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    pub phase: SubmissionPhase,
    pub is_loading: bool,
    pub error: Option<String>,
    pub last_result: Option<LastResult>,
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    /// Idle/Succeeded/Failed -> Submitting. Returns false, leaving the state
    /// untouched, when a submission is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.phase = SubmissionPhase::Submitting;
        self.is_loading = true;
        self.error = None;
        true
    }

    pub fn succeed(&mut self, text: String, timestamp: String) {
        let seq = self.last_result.as_ref().map_or(1, |r| r.seq + 1);
        self.phase = SubmissionPhase::Succeeded;
        self.is_loading = false;
        self.last_result = Some(LastResult { text, timestamp, success: true, seq });
    }

    pub fn fail(&mut self) {
        self.phase = SubmissionPhase::Failed;
        self.is_loading = false;
        self.error = Some(SUBMIT_FAILED_MESSAGE.to_string());
    }

    /// The in-flight request was dropped before completing: back to Idle, nothing recorded.
    pub fn abandon(&mut self) {
        if self.is_submitting() {
            self.phase = SubmissionPhase::Idle;
            self.is_loading = false;
        }
    }
}

use std::{sync::Mutex, time::Duration};
use tokio::task::JoinHandle;

use super::lock;

/// Timer di una superficie: al più uno in attesa, annullato quando viene
/// riarmato o quando la superficie viene distrutta.
#[derive(Default)]
pub(crate) struct DisplayTimer {
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DisplayTimer {
    /// Must be called from within a tokio runtime.
    pub(crate) fn schedule<F>(&self, after: Duration, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        // la scadenza parte da adesso, non dal primo poll del task
        let sleep = tokio::time::sleep(after);
        let handle = tokio::spawn(async move {
            sleep.await;
            f();
        });
        if let Some(prev) = lock(&self.pending).replace(handle) {
            prev.abort();
        }
    }

    pub(crate) fn cancel(&self) {
        if let Some(handle) = lock(&self.pending).take() {
            handle.abort();
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        lock(&self.pending).as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for DisplayTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use super::{form::FormController, ContactSurface, FormField, SubmitOutcome, SurfaceView};
use crate::{error::SessionError, session::SessionHandle};

/// Durata del messaggio di successo sulla pagina.
pub const INLINE_SUCCESS_WINDOW: Duration = Duration::from_millis(3000);

/// Pagina di contatto inline. Il parametro `companyId` dell'URL ha la
/// precedenza sul valore della sessione e lo sovrascrive.
pub struct InlinePage {
    controller: FormController,
    url_company_id: Option<String>,
}

impl InlinePage {
    /// `query` è la query string della pagina, con o senza '?'.
    pub fn mount(session: SessionHandle, query: Option<&str>) -> Result<Self, SessionError> {
        let controller = FormController::new(session, INLINE_SUCCESS_WINDOW, false);
        controller.open();
        let mut page = Self { controller, url_company_id: None };
        page.navigate(query)?;
        Ok(page)
    }

    pub fn from_url(session: SessionHandle, url: &Url) -> Result<Self, SessionError> {
        Self::mount(session, url.query())
    }

    /// Nuova query string (navigazione lato client): riallinea il company id.
    pub fn navigate(&mut self, query: Option<&str>) -> Result<(), SessionError> {
        self.url_company_id = query.and_then(company_id_from_query);
        if let Some(url_id) = &self.url_company_id {
            let session = self.controller.session();
            if session.company_id()? != *url_id {
                session.set_company_id(url_id.clone())?;
            }
        }
        Ok(())
    }

    pub fn active_company_id(&self) -> Result<String, SessionError> {
        match &self.url_company_id {
            Some(id) => Ok(id.clone()),
            None => self.controller.session().company_id(),
        }
    }

    pub fn focus(&self, field: FormField) {
        self.controller.focus(field);
    }

    /// Vero finché il messaggio di successo è in attesa di essere nascosto.
    pub fn success_pending(&self) -> bool {
        self.controller.success_pending()
    }
}

#[async_trait]
impl ContactSurface for InlinePage {
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
        self.controller.submit(self.url_company_id.as_deref()).await
    }
}

fn company_id_from_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "companyId")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

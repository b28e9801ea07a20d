/// Base URL of the ingress API used by the widget when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3002/api";

/// Path appended to the API base URL when submitting a message.
pub const MESSAGES_ENDPOINT: &str = "/messages";

/// Tenant used to tag messages when no company identifier is provided.
pub const DEFAULT_COMPANY_ID: &str = "domicilia";

pub const DEFAULT_COMPANY_NAME: &str = "Domicilia";

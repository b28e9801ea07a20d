pub mod http;

pub use http::{HealthResponse, ListMessagesQuery, ListMessagesResponse, MessageAck, WelcomeResponse};

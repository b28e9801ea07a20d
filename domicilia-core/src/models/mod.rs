pub mod message;

pub use message::{ContactMessage, StoredMessage};

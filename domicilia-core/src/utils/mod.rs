pub mod ids;
pub mod time;

pub use self::ids::new_message_id;
pub use self::time::{is_rfc3339, now_timestamp};

//! Data models for the debate service wire format.
//!
//! - [`Message`] - a single chat entry as the service returns it
//! - [`Role`] - who authored a message (`user` or `bot`)
//! - [`ConversationSummary`] - read-only projection used by the history index
//!
//! Field names follow the service's JSON exactly (`message` for the text,
//! `ts` for the unix-millisecond timestamp), so these types deserialize raw
//! responses without translation.

pub mod message;
pub mod summary;

pub use message::{Message, Role};
pub use summary::ConversationSummary;

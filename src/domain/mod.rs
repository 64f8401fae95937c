//! Guestbook domain types
//!
//! Provides the message record shared by the store and the HTTP layer.

pub mod message;

pub use message::{CreateMessageRequest, Message};

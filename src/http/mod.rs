//! HTTP transport for the guestbook
//!
//! Provides the `/api/messages` and `/health` endpoints on top of the message store.

pub mod handlers;

//! WebSocket layer: connection handling, message routing, sessions.
//!
//! The WebSocket endpoint at `/ws` delivers real-time notifications. A
//! client identifies itself with an `identify` command; from then on every
//! notification addressed to that user is pushed as an `event` message.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod session;

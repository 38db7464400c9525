//! # slot-swapper
//!
//! REST API and WebSocket service for peer-to-peer calendar slot swapping.
//!
//! Users publish calendar events, mark some of them `SWAPPABLE`, browse
//! other users' swappable events, and negotiate one-for-one exchanges. An
//! accepted swap exchanges ownership of both events atomically; every step
//! of the negotiation notifies the counterparty in real time.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── EventService / SwapService / UserService (service/)
//!     ├── NotificationBus (domain/)
//!     │
//!     ├── SlotStore + UnitOfWork (store/)
//!     │
//!     └── PostgreSQL notification journal (persistence/, optional)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod store;
pub mod ws;

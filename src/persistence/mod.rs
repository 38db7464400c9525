//! Persistence layer: optional PostgreSQL notification journal.
//!
//! Negotiation state lives in [`crate::store::SlotStore`]; this module only
//! records dispatched notifications so users who were offline can catch up.
//! The concrete implementation uses `sqlx::PgPool` for async PostgreSQL
//! access.

pub mod journal;
pub mod models;
pub mod postgres;

pub use models::JournalEntry;
pub use postgres::PostgresJournal;

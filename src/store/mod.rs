//! Record store: committed state plus the atomic unit-of-work abstraction.
//!
//! The orchestrator never begins or commits transactions by hand; it hands
//! a closure to [`SlotStore::unit_of_work`] and the store commits all of the
//! closure's writes or none of them.

pub mod slot_store;
pub mod unit_of_work;

pub use slot_store::{SlotStore, StoreState};
pub use unit_of_work::UnitOfWork;

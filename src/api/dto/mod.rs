//! Data Transfer Objects for REST request/response serialization.
//!
//! Request bodies declare every field as optional so that a missing field
//! surfaces as a structured `missing_field` error instead of a bare
//! deserialization rejection.

pub mod common_dto;
pub mod event_dto;
pub mod notification_dto;
pub mod swap_dto;
pub mod user_dto;

pub use common_dto::*;
pub use event_dto::*;
pub use notification_dto::*;
pub use swap_dto::*;
pub use user_dto::*;

//! REST endpoint handlers organized by resource.

pub mod event;
pub mod notification;
pub mod swap;
pub mod system;
pub mod user;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(user::routes())
        .merge(event::routes())
        .merge(swap::routes())
        .merge(notification::routes())
}

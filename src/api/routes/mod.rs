//! API routes module

pub mod availability;
pub mod book;
pub mod health;
pub mod now;

use axum::Router;

use crate::api::state::SharedState;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Liveness
        .nest("/health", health::router())
        // Current time in the calendar's timezone
        .nest("/now", now::router())
        // Placeholder availability
        .nest("/availability", availability::router())
        // Create a calendar event
        .nest("/book", book::router())
}

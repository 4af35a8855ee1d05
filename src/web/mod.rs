//! Web server module
//!
//! Provides the HTTP API consumed by the search frontend.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;

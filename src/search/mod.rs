//! Search relay module
//!
//! Validates searches, enforces the provider's result window and forwards
//! everything else to Google Custom Search.

mod backend;
mod error;
mod models;
mod relay;
pub mod window;

pub use backend::{CseClient, SearchBackend};
pub use error::RelayError;
pub use models::*;
pub use relay::SearchRelay;

// DropRewards Gateway - HTTP entry point for the rewards ledger
// Deserializes JSON requests, invokes the ledger, and wraps responses
// in the platform's { success, ... } envelope.

pub mod error;
pub mod routes;

pub use error::ApiError;
pub use routes::{app, AppState};

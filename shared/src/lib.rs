//! Shared types for the rota scheduling backend
//!
//! Domain models and the unified error system used by the server crate.
//! The `db` feature gates `sqlx::FromRow` derives so non-database consumers
//! (tooling, clients) stay dependency-light.

pub mod error;
pub mod models;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

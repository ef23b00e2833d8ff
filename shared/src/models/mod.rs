//! Data models
//!
//! Shared between the server and API consumers.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (PostgreSQL BIGSERIAL).

pub mod employee;
pub mod outcome;
pub mod shift;
pub mod shift_selection;
pub mod swap_request;

// Re-exports
pub use employee::*;
pub use outcome::*;
pub use shift::*;
pub use shift_selection::*;
pub use swap_request::*;

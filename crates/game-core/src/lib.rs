//! Shared domain model for the market-replay tendency game.
//!
//! Holds the session/ledger types, the structured error taxonomy, and the
//! trait seams for external collaborators (chart data, user identity,
//! durable result storage).

pub mod error;
pub mod traits;
pub mod types;

pub use error::GameError;
pub use traits::*;
pub use types::*;

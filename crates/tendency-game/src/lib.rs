//! Market-Replay Tendency Game
//!
//! A gamified trading simulation: the player replays several weeks of an
//! anonymized instrument's historical prices, places buy/sell orders, and
//! receives a four-axis behavioral classification derived from how they
//! traded. `GameEngine` is the single entry point; everything else is
//! composed behind it.

pub mod accounting;
pub mod config;
pub mod engine;
pub mod memory;
pub mod metrics;
pub mod narrative;
pub mod projector;
pub mod sampler;
pub mod scoring;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::GameConfig;
pub use engine::{GameEngine, IdGenerator, SequentialIds};
pub use memory::{InMemoryChartSource, InMemoryResultSink, InMemoryUserDirectory};
pub use scoring::{ScoringInputs, TendencyScore};
pub use store::SessionStore;

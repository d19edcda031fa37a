use crate::{ChartDefinition, FinishResult, GameError, PricePoint};
use async_trait::async_trait;

/// Supplies selectable chart definitions and their historical timelines.
///
/// Fetched exactly once per session, at start.
#[async_trait]
pub trait ChartDataSource: Send + Sync {
    /// All chart definitions eligible for a new game
    async fn definitions(&self) -> Result<Vec<ChartDefinition>, GameError>;

    /// Ordered daily price points covering the definition's date range
    async fn timeline(&self, definition: &ChartDefinition) -> Result<Vec<PricePoint>, GameError>;
}

/// Resolves already-authenticated user identifiers.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Ok when the user exists, `UserNotFound` otherwise
    async fn verify(&self, user_id: u64) -> Result<(), GameError>;
}

/// Durably records finished-game scores keyed by user and timestamp.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn record(&self, user_id: u64, result: &FinishResult) -> Result<(), GameError>;

    /// Most recent recorded result for the user, if any
    async fn latest_for_user(&self, user_id: u64) -> Result<Option<FinishResult>, GameError>;
}

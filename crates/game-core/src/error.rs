use thiserror::Error;

/// Deterministic business-rule failures of the tendency game.
///
/// None of these are transient: they are never retried internally and
/// propagate to the caller carrying their kind.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Game session not found")]
    SessionNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Session is finished; no further operations are allowed")]
    SessionFinished,

    #[error("Already at the final week; cannot advance further")]
    AlreadyAtFinalWeek,

    #[error("The game must reach the final week before it can be finished")]
    NotAtFinalWeek,

    #[error("Insufficient cash: order costs {required}, only {available} available")]
    InsufficientCash { required: i64, available: i64 },

    #[error("Insufficient holding: tried to sell {requested}, only {held} held")]
    InsufficientHolding { requested: i64, held: i64 },

    #[error("Arithmetic overflow in a cash or valuation computation")]
    ArithmeticOverflow,

    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("No game chart definitions available")]
    NoChartAvailable,

    #[error("Chart data source error: {0}")]
    DataSource(String),

    #[error("Result sink error: {0}")]
    Sink(String),
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Side of an executed order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "buy"),
            TradeSide::Sell => write!(f, "sell"),
        }
    }
}

impl std::str::FromStr for TradeSide {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buy" => Ok(TradeSide::Buy),
            "sell" => Ok(TradeSide::Sell),
            _ => Err(anyhow::anyhow!("Invalid trade side: {}", s)),
        }
    }
}

/// Lifecycle status of a game session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Session is live and accepting orders
    InProgress,
    /// Terminal state; no further mutation permitted
    Finished,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in_progress"),
            GameStatus::Finished => write!(f, "finished"),
        }
    }
}

/// One daily point of a historical price timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    /// End-of-day price in integer currency units (0 when the source had none)
    pub close: i64,
}

/// A selectable replay chart: an instrument plus the date range to replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDefinition {
    pub ticker: String,
    pub company_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// A short narrative news item attached to a week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub url: String,
    pub summary: String,
}

/// One sampled week of the replay. Immutable once generated at session start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSnapshot {
    /// 1-based, contiguous week index
    pub week_index: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Close price of the sampled day
    pub close_price: i64,
    /// Price change vs. the previous sampled week (0 for week 1)
    pub change_price: i64,
    /// Percentage change vs. the previous sampled week (0.0 for week 1)
    pub change_rate: f64,
    /// Narrative keywords for the week
    pub keywords: Vec<String>,
    /// Narrative news items for the week
    pub news: Vec<NewsItem>,
}

/// An executed order. Immutable once recorded; the ledger only grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: u64,
    pub side: TradeSide,
    /// Execution price (the owning week's close)
    pub price: i64,
    pub quantity: i64,
    /// Week index the session was at when the order executed
    pub week_index: u32,
    pub executed_at: DateTime<Utc>,
    pub executed_date: NaiveDate,
    /// Whether the owning week was volatile at execution time
    pub volatile_week: bool,
}

/// One user's play-through of the week-by-week trading simulation.
///
/// The session exclusively owns its week snapshots and trade ledger; both
/// live and die with it in the session store.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub id: u64,
    pub user_id: u64,
    pub ticker: String,
    /// Anonymized display name shown instead of the real company
    pub company_alias: String,
    pub initial_cash: i64,
    pub cash: i64,
    /// Units of the instrument currently held
    pub quantity: i64,
    /// Volume-weighted average purchase price; 0 whenever quantity is 0
    pub average_cost: i64,
    /// Cumulative profit recognized on sells (can be negative)
    pub realized_profit: i64,
    /// Current week, 1..=max_week
    pub current_week: u32,
    pub max_week: u32,
    pub status: GameStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Total decision time accumulated so far, in milliseconds
    pub decision_elapsed_ms: i64,
    pub volatile_buy_count: u32,
    pub volatile_sell_count: u32,
    pub sell_dominant_week_count: u32,
    /// Week snapshots, populated once at start
    pub weeks: Vec<WeekSnapshot>,
    /// Append-only trade ledger
    pub trades: Vec<Trade>,
    /// Week indexes whose sell-dominance metric has already been evaluated
    pub dominance_evaluated: HashSet<u32>,
    /// Last mutating or reading access, drives store eviction
    pub last_activity: DateTime<Utc>,
}

impl GameSession {
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Snapshot of the week the session currently sits at
    pub fn current_snapshot(&self) -> Option<&WeekSnapshot> {
        self.weeks.get(self.current_week.saturating_sub(1) as usize)
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_activity = now;
    }
}

/// Cash/position summary of a session at the current week's price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub cash: i64,
    pub holding_quantity: i64,
    pub holding_valuation: i64,
    pub total_asset: i64,
    pub realized_profit: i64,
    pub total_yield: f64,
}

/// Full price history shown on the game chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Week start dates, ISO formatted
    pub labels: Vec<String>,
    pub prices: Vec<i64>,
}

/// What the player sees about the instrument this week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentOverview {
    pub company_alias: String,
    pub ticker: String,
    pub current_date: NaiveDate,
    /// Start of the next week, absent at the final week
    pub next_date: Option<NaiveDate>,
    pub price: i64,
    pub change: i64,
    pub change_rate: f64,
    pub chart: ChartSeries,
    pub final_week: bool,
}

/// Order-entry panel figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePanel {
    pub holding_quantity: i64,
    pub holding_valuation: i64,
    pub average_cost: i64,
    pub unrealized_profit: i64,
    pub unrealized_rate: f64,
    /// Units affordable with current cash at the current price
    pub max_affordable: i64,
    /// Units sellable (the whole holding)
    pub max_sellable: i64,
}

/// One row of the trade history panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub trade_id: u64,
    pub side: TradeSide,
    pub price: i64,
    pub quantity: i64,
    pub trade_date: NaiveDate,
    pub executed_at: DateTime<Utc>,
}

/// Narrative highlights of the current week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekHighlights {
    pub keywords: Vec<String>,
    pub news: Vec<NewsItem>,
    pub summary: String,
}

/// Read-only projection of a session, rebuilt after every operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub session_id: u64,
    pub week: u32,
    pub max_week: u32,
    pub finished: bool,
    pub summary: PortfolioSummary,
    pub overview: InstrumentOverview,
    pub trade_panel: TradePanel,
    /// Most recent first
    pub trades: Vec<TradeRecord>,
    pub highlights: WeekHighlights,
}

/// Four complementary axis pairs; each pair sums to exactly 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TendencyAxes {
    pub i: i32,
    pub e: i32,
    pub s: i32,
    pub n: i32,
    pub t: i32,
    pub f: i32,
    pub j: i32,
    pub p: i32,
}

/// Coarse risk-profile label derived from session behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskProfile {
    Aggressive,
    Defensive,
    Balanced,
}

impl RiskProfile {
    /// Fixed advice line shown alongside the label
    pub fn recommendation(&self) -> &'static str {
        match self {
            RiskProfile::Aggressive => {
                "Prefers active, high-conviction positions and is comfortable chasing momentum."
            }
            RiskProfile::Defensive => {
                "Values stability and tends to step away from risk early."
            }
            RiskProfile::Balanced => {
                "Weighs return against risk and keeps the portfolio near equilibrium."
            }
        }
    }
}

impl std::fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskProfile::Aggressive => write!(f, "AGGRESSIVE"),
            RiskProfile::Defensive => write!(f, "DEFENSIVE"),
            RiskProfile::Balanced => write!(f, "BALANCED"),
        }
    }
}

/// Final outcome of a finished session.
///
/// Computed fresh at finish time from the counters accumulated over the
/// session's life; the session itself carries no scoring fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinishResult {
    pub session_id: u64,
    pub max_week: u32,
    pub final_week: u32,
    /// Cash plus holding valuation at the final week's close
    pub total_asset: i64,
    pub realized_profit: i64,
    pub total_yield: f64,
    /// Whether the yield cleared the product's 3% threshold
    pub yield_above_threshold: bool,
    pub axes: TendencyAxes,
    /// Four-letter tendency code, e.g. "ENTP"
    pub code: String,
    pub risk_profile: RiskProfile,
    pub recommendation: String,
    pub decision_elapsed_seconds: i64,
    pub volatile_buy_count: u32,
    pub volatile_sell_count: u32,
    pub sell_dominant_week_count: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_side_parse() {
        assert_eq!("buy".parse::<TradeSide>().unwrap(), TradeSide::Buy);
        assert_eq!("SELL".parse::<TradeSide>().unwrap(), TradeSide::Sell);
        assert!("hold".parse::<TradeSide>().is_err());
    }

    #[test]
    fn risk_profile_display() {
        assert_eq!(RiskProfile::Aggressive.to_string(), "AGGRESSIVE");
        assert_eq!(RiskProfile::Balanced.to_string(), "BALANCED");
    }
}

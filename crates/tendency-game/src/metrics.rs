//! Metrics Tracker
//!
//! Classifies volatile weeks and maintains the behavioral counters the
//! scoring module consumes at finish time.

use game_core::{GameSession, TradeSide, WeekSnapshot};

/// A week is volatile when its percentage change magnitude reaches the threshold
pub fn is_volatile_week(week: &WeekSnapshot, threshold: f64) -> bool {
    week.change_rate.abs() >= threshold
}

/// Evaluate sell dominance for `week_index` and bump the counter when the
/// week's executed sell volume exceeds its buy volume.
///
/// Each week index is evaluated at most once per session, so calling this
/// both when leaving a week and again at finish can never double-count.
/// Weeks with no trades contribute nothing.
pub fn update_sell_dominance(session: &mut GameSession, week_index: u32) {
    if !session.dominance_evaluated.insert(week_index) {
        return;
    }

    let mut buy_quantity = 0i64;
    let mut sell_quantity = 0i64;
    for trade in session.trades.iter().filter(|t| t.week_index == week_index) {
        match trade.side {
            TradeSide::Buy => buy_quantity += trade.quantity,
            TradeSide::Sell => sell_quantity += trade.quantity,
        }
    }
    if buy_quantity == 0 && sell_quantity == 0 {
        return;
    }
    if sell_quantity > buy_quantity {
        session.sell_dominant_week_count += 1;
    }
}

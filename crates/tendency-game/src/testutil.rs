//! Shared fixtures for unit tests.

use crate::sampler;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use game_core::{GameSession, GameStatus, PricePoint, Trade, TradeSide};
use std::collections::HashSet;

pub fn fixed_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 4).unwrap()
}

/// Daily timeline with one point per close, starting at the fixed date
pub fn timeline(closes: &[i64]) -> Vec<PricePoint> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PricePoint {
            date: fixed_start_date() + Duration::days(i as i64),
            close,
        })
        .collect()
}

/// In-progress session at week 1 with no snapshots or trades
pub fn blank_session(cash: i64) -> GameSession {
    let now = Utc.with_ymd_and_hms(2021, 1, 4, 9, 0, 0).unwrap();
    GameSession {
        id: 1,
        user_id: 1,
        ticker: "TEST".to_string(),
        company_alias: "Anonymous Corp A".to_string(),
        initial_cash: cash,
        cash,
        quantity: 0,
        average_cost: 0,
        realized_profit: 0,
        current_week: 1,
        max_week: 10,
        status: GameStatus::InProgress,
        started_at: now,
        finished_at: None,
        decision_elapsed_ms: 0,
        volatile_buy_count: 0,
        volatile_sell_count: 0,
        sell_dominant_week_count: 0,
        weeks: Vec::new(),
        trades: Vec::new(),
        dominance_evaluated: HashSet::new(),
        last_activity: now,
    }
}

/// Session whose weekly closes are exactly `closes`, one week per close
pub fn session_with_weeks(cash: i64, closes: &[i64]) -> GameSession {
    let mut session = blank_session(cash);
    session.max_week = closes.len() as u32;
    session.weeks = sampler::sample_weeks(&timeline(closes), closes.len() as u32).unwrap();
    session
}

/// Append a ledger entry without going through the engine
pub fn push_trade(session: &mut GameSession, side: TradeSide, quantity: i64, week_index: u32) {
    let id = session.trades.len() as u64 + 1;
    session.trades.push(Trade {
        id,
        side,
        price: 1000,
        quantity,
        week_index,
        executed_at: session.started_at + Duration::minutes(id as i64),
        executed_date: fixed_start_date(),
        volatile_week: false,
    });
}

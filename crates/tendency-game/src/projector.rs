//! State Projector
//!
//! Renders a read-only snapshot of a session for presentation. Pure with
//! respect to the session: projecting twice without an intervening
//! mutation yields identical states.

use crate::{accounting, narrative};
use game_core::{
    ChartSeries, GameSession, InstrumentOverview, PortfolioSummary, SessionState, TradePanel,
    TradeRecord, WeekHighlights,
};

/// Project the full presentation state of a session.
///
/// Valuations here saturate instead of failing: reads never reject, only
/// mutating operations enforce the overflow taxonomy.
pub fn project(session: &GameSession) -> SessionState {
    // snapshots cover 1..=max_week and current_week stays in that range
    let week_idx = session.current_week.max(1) as usize - 1;
    let week = &session.weeks[week_idx];
    let price = week.close_price;

    let holding_valuation = session.quantity.saturating_mul(price);
    let total_asset = session.cash.saturating_add(holding_valuation);
    let total_yield = accounting::total_yield(session.initial_cash, total_asset);

    let summary = PortfolioSummary {
        cash: session.cash,
        holding_quantity: session.quantity,
        holding_valuation,
        total_asset,
        realized_profit: session.realized_profit,
        total_yield,
    };

    let chart = ChartSeries {
        labels: session
            .weeks
            .iter()
            .map(|w| w.start_date.to_string())
            .collect(),
        prices: session.weeks.iter().map(|w| w.close_price).collect(),
    };
    let next_date = if session.current_week < session.max_week {
        session
            .weeks
            .get(session.current_week as usize)
            .map(|w| w.start_date)
    } else {
        None
    };
    let overview = InstrumentOverview {
        company_alias: session.company_alias.clone(),
        ticker: session.ticker.clone(),
        current_date: week.start_date,
        next_date,
        price,
        change: week.change_price,
        change_rate: week.change_rate,
        chart,
        final_week: session.current_week == session.max_week,
    };

    let unrealized_profit = session
        .quantity
        .saturating_mul(price.saturating_sub(session.average_cost));
    let unrealized_rate = if session.average_cost == 0 {
        0.0
    } else {
        (price - session.average_cost) as f64 / session.average_cost as f64 * 100.0
    };
    let trade_panel = TradePanel {
        holding_quantity: session.quantity,
        holding_valuation,
        average_cost: session.average_cost,
        unrealized_profit,
        unrealized_rate,
        max_affordable: if price == 0 { 0 } else { session.cash / price },
        max_sellable: session.quantity,
    };

    // ledger is append-only in execution order, so reverse = most recent first
    let trades = session
        .trades
        .iter()
        .rev()
        .map(|t| TradeRecord {
            trade_id: t.id,
            side: t.side,
            price: t.price,
            quantity: t.quantity,
            trade_date: t.executed_date,
            executed_at: t.executed_at,
        })
        .collect();

    let highlights = WeekHighlights {
        keywords: week.keywords.clone(),
        news: week.news.clone(),
        summary: narrative::weekly_summary(week.start_date),
    };

    SessionState {
        session_id: session.id,
        week: session.current_week,
        max_week: session.max_week,
        finished: session.is_finished(),
        summary,
        overview,
        trade_panel,
        trades,
        highlights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounting::{apply_buy, apply_sell};
    use crate::testutil::session_with_weeks;
    use game_core::TradeSide;

    #[test]
    fn valuation_uses_the_current_week_close() {
        let mut session = session_with_weeks(1_000_000, &[1000, 1200, 1500]);
        apply_buy(&mut session, 10, 1000).unwrap();
        session.current_week = 2;

        let state = project(&session);
        assert_eq!(state.summary.holding_valuation, 12_000);
        assert_eq!(state.summary.total_asset, 990_000 + 12_000);
        assert!((state.summary.total_yield - 0.2).abs() < 1e-9);
    }

    #[test]
    fn projection_is_idempotent() {
        let mut session = session_with_weeks(1_000_000, &[1000, 1100]);
        apply_buy(&mut session, 3, 1000).unwrap();

        let first = project(&session);
        let second = project(&session);
        assert_eq!(first, second);
    }

    #[test]
    fn trade_panel_figures_follow_the_ledger() {
        let mut session = session_with_weeks(1_000_000, &[1000, 2000]);
        apply_buy(&mut session, 10, 1000).unwrap();
        apply_buy(&mut session, 3, 2000).unwrap();
        session.current_week = 2;

        let state = project(&session);
        assert_eq!(state.trade_panel.average_cost, 1231);
        assert_eq!(state.trade_panel.unrealized_profit, 13 * (2000 - 1231));
        assert_eq!(state.trade_panel.max_affordable, 984_000 / 2000);
        assert_eq!(state.trade_panel.max_sellable, 13);
    }

    #[test]
    fn unrealized_rate_is_zero_with_no_position() {
        let session = session_with_weeks(1_000_000, &[1000]);
        let state = project(&session);
        assert_eq!(state.trade_panel.unrealized_rate, 0.0);
        assert_eq!(state.trade_panel.unrealized_profit, 0);
    }

    #[test]
    fn chart_spans_every_week_and_next_date_tracks_progress() {
        let mut session = session_with_weeks(1_000_000, &[100, 200, 300]);
        let state = project(&session);
        assert_eq!(state.overview.chart.prices, vec![100, 200, 300]);
        assert_eq!(state.overview.chart.labels.len(), 3);
        assert_eq!(state.overview.next_date, Some(session.weeks[1].start_date));
        assert!(!state.overview.final_week);

        session.current_week = 3;
        let state = project(&session);
        assert_eq!(state.overview.next_date, None);
        assert!(state.overview.final_week);
    }

    #[test]
    fn trades_render_most_recent_first() {
        let mut session = session_with_weeks(1_000_000, &[1000]);
        apply_buy(&mut session, 2, 1000).unwrap();
        crate::testutil::push_trade(&mut session, TradeSide::Buy, 2, 1);
        apply_sell(&mut session, 1, 1000).unwrap();
        crate::testutil::push_trade(&mut session, TradeSide::Sell, 1, 1);

        let state = project(&session);
        assert_eq!(state.trades.len(), 2);
        assert_eq!(state.trades[0].side, TradeSide::Sell);
        assert_eq!(state.trades[1].side, TradeSide::Buy);
    }

    #[test]
    fn state_serializes_to_json() {
        let session = session_with_weeks(1_000_000, &[1000, 1100]);
        let state = project(&session);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["week"], 1);
        assert_eq!(json["summary"]["cash"], 1_000_000);
        assert_eq!(json["highlights"]["keywords"].as_array().unwrap().len(), 5);
    }
}

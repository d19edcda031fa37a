//! Game Engine
//!
//! The orchestrator and only entry point for callers. Enforces the
//! session state machine, pulls the chart timeline once at start, and
//! composes the sampler, accounting, metrics, scoring and projector.

use crate::config::GameConfig;
use crate::scoring::ScoringInputs;
use crate::store::SessionStore;
use crate::{accounting, metrics, projector, sampler, scoring};
use chrono::{NaiveDate, Utc};
use game_core::{
    ChartDataSource, ChartDefinition, FinishResult, GameError, GameSession, GameStatus,
    ResultSink, SessionState, Trade, TradeSide, UserDirectory,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Source of session and trade identifiers.
///
/// Injectable so tests can control and predict ids.
pub trait IdGenerator: Send + Sync {
    fn next_session_id(&self) -> u64;
    fn next_trade_id(&self) -> u64;
}

/// Default generator: monotonic in-process counters starting at 1
#[derive(Default)]
pub struct SequentialIds {
    sessions: AtomicU64,
    trades: AtomicU64,
}

impl IdGenerator for SequentialIds {
    fn next_session_id(&self) -> u64 {
        self.sessions.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn next_trade_id(&self) -> u64 {
        self.trades.fetch_add(1, Ordering::Relaxed) + 1
    }
}

pub struct GameEngine {
    charts: Arc<dyn ChartDataSource>,
    users: Arc<dyn UserDirectory>,
    results: Arc<dyn ResultSink>,
    store: SessionStore,
    ids: Arc<dyn IdGenerator>,
    rng: Mutex<StdRng>,
    config: GameConfig,
}

impl GameEngine {
    pub fn new(
        charts: Arc<dyn ChartDataSource>,
        users: Arc<dyn UserDirectory>,
        results: Arc<dyn ResultSink>,
        config: GameConfig,
    ) -> Self {
        Self {
            charts,
            users,
            results,
            store: SessionStore::new(config.session_ttl, config.max_sessions),
            ids: Arc::new(SequentialIds::default()),
            rng: Mutex::new(StdRng::from_entropy()),
            config,
        }
    }

    /// Seed chart selection and alias generation for reproducible runs
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Create a new session: pick a chart, fetch its timeline once, sample
    /// the weekly snapshots and open play at week 1.
    pub async fn start(
        &self,
        user_id: u64,
        instrument_hint: Option<&str>,
    ) -> Result<SessionState, GameError> {
        self.users.verify(user_id).await?;
        self.store.sweep(Utc::now());

        let definitions = self.charts.definitions().await?;
        if definitions.is_empty() {
            return Err(GameError::NoChartAvailable);
        }
        let eligible: Vec<&ChartDefinition> = match instrument_hint {
            Some(hint) => {
                let matched: Vec<&ChartDefinition> = definitions
                    .iter()
                    .filter(|d| d.ticker.eq_ignore_ascii_case(hint))
                    .collect();
                if matched.is_empty() {
                    definitions.iter().collect()
                } else {
                    matched
                }
            }
            None => definitions.iter().collect(),
        };

        let (definition, company_alias) = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            let definition = eligible[rng.gen_range(0..eligible.len())].clone();
            let letter = (b'A' + rng.gen_range(0..26u8)) as char;
            (definition, format!("Anonymous Corp {}", letter))
        };

        let timeline = self.charts.timeline(&definition).await?;
        if (timeline.len() as u32) < self.config.max_week {
            return Err(GameError::InsufficientData(format!(
                "chart {} covers {} points, need at least {}",
                definition.ticker,
                timeline.len(),
                self.config.max_week
            )));
        }
        let weeks = sampler::sample_weeks(&timeline, self.config.max_week)?;

        let now = Utc::now();
        let session = GameSession {
            id: self.ids.next_session_id(),
            user_id,
            ticker: definition.ticker.clone(),
            company_alias,
            initial_cash: self.config.initial_cash,
            cash: self.config.initial_cash,
            quantity: 0,
            average_cost: 0,
            realized_profit: 0,
            current_week: 1,
            max_week: self.config.max_week,
            status: GameStatus::InProgress,
            started_at: now,
            finished_at: None,
            decision_elapsed_ms: 0,
            volatile_buy_count: 0,
            volatile_sell_count: 0,
            sell_dominant_week_count: 0,
            weeks,
            trades: Vec::new(),
            dominance_evaluated: HashSet::new(),
            last_activity: now,
        };
        tracing::info!(
            session_id = session.id,
            user_id,
            ticker = %session.ticker,
            "started tendency game session"
        );

        let state = projector::project(&session);
        self.store.insert(session);
        Ok(state)
    }

    /// Pure read of the current presentation state
    pub async fn get_state(
        &self,
        user_id: u64,
        session_id: u64,
    ) -> Result<SessionState, GameError> {
        let handle = self.resolve(session_id)?;
        let mut session = Self::lock_owned(&handle, user_id)?;
        session.touch(Utc::now());
        Ok(projector::project(&session))
    }

    /// Execute a buy or sell at the current week's close price
    pub async fn place_order(
        &self,
        user_id: u64,
        session_id: u64,
        side: TradeSide,
        quantity: i64,
        trade_date: NaiveDate,
    ) -> Result<SessionState, GameError> {
        if quantity <= 0 {
            return Err(GameError::InvalidOrder(format!(
                "quantity must be positive, got {}",
                quantity
            )));
        }
        let handle = self.resolve(session_id)?;
        let mut session = Self::lock_owned(&handle, user_id)?;
        Self::ensure_in_progress(&session)?;

        let (price, volatile_week) = {
            let week = session.current_snapshot().ok_or_else(|| {
                GameError::InsufficientData("missing snapshot for the current week".to_string())
            })?;
            (
                week.close_price,
                metrics::is_volatile_week(week, self.config.volatility_threshold),
            )
        };

        match side {
            TradeSide::Buy => accounting::apply_buy(&mut session, quantity, price)?,
            TradeSide::Sell => accounting::apply_sell(&mut session, quantity, price)?,
        }
        if volatile_week {
            match side {
                TradeSide::Buy => session.volatile_buy_count += 1,
                TradeSide::Sell => session.volatile_sell_count += 1,
            }
        }

        let now = Utc::now();
        let week_index = session.current_week;
        session.trades.push(Trade {
            id: self.ids.next_trade_id(),
            side,
            price,
            quantity,
            week_index,
            executed_at: now,
            executed_date: trade_date,
            volatile_week,
        });
        session.touch(now);
        tracing::debug!(
            session_id,
            user_id,
            side = %side,
            quantity,
            price,
            volatile_week,
            "order executed"
        );
        Ok(projector::project(&session))
    }

    /// Leave the current week behind and move to the next one
    pub async fn advance_week(
        &self,
        user_id: u64,
        session_id: u64,
    ) -> Result<SessionState, GameError> {
        let handle = self.resolve(session_id)?;
        let mut session = Self::lock_owned(&handle, user_id)?;
        Self::ensure_in_progress(&session)?;

        if session.current_week >= session.max_week {
            tracing::warn!(session_id, user_id, "advance rejected at final week");
            return Err(GameError::AlreadyAtFinalWeek);
        }

        let leaving = session.current_week;
        metrics::update_sell_dominance(&mut session, leaving);
        session.current_week += 1;
        let now = Utc::now();
        session.decision_elapsed_ms = (now - session.started_at).num_milliseconds();
        session.touch(now);
        tracing::debug!(session_id, week = session.current_week, "advanced to next week");
        Ok(projector::project(&session))
    }

    /// Close out the session at the final week and score it.
    ///
    /// The transition to `Finished` is terminal; the result is recorded
    /// through the sink and returned.
    pub async fn finish(&self, user_id: u64, session_id: u64) -> Result<FinishResult, GameError> {
        let handle = self.resolve(session_id)?;
        let result = {
            let mut session = Self::lock_owned(&handle, user_id)?;
            Self::ensure_in_progress(&session)?;

            if session.current_week != session.max_week {
                tracing::warn!(
                    session_id,
                    week = session.current_week,
                    "finish rejected before final week"
                );
                return Err(GameError::NotAtFinalWeek);
            }

            let final_week = session.current_week;
            metrics::update_sell_dominance(&mut session, final_week);

            if session.weeks.len() < session.max_week as usize {
                return Err(GameError::InsufficientData(
                    "weekly snapshots do not cover the full game".to_string(),
                ));
            }
            let final_price = session.weeks[session.max_week as usize - 1].close_price;
            let valuation = session
                .quantity
                .checked_mul(final_price)
                .ok_or(GameError::ArithmeticOverflow)?;
            let total_asset = session
                .cash
                .checked_add(valuation)
                .ok_or(GameError::ArithmeticOverflow)?;
            let total_yield = accounting::total_yield(session.initial_cash, total_asset);

            let now = Utc::now();
            session.finished_at = Some(now);
            session.decision_elapsed_ms = (now - session.started_at).num_milliseconds();
            session.status = GameStatus::Finished;
            session.touch(now);

            let elapsed_seconds = session.decision_elapsed_ms / 1000;
            let volatile_trade_count = session.volatile_buy_count + session.volatile_sell_count;
            let tendency = scoring::score(ScoringInputs {
                elapsed_seconds,
                volatile_trade_count,
                sell_dominant_week_count: session.sell_dominant_week_count,
                total_yield,
            });
            tracing::info!(
                session_id,
                user_id,
                code = %tendency.code,
                risk_profile = %tendency.risk_profile,
                total_yield,
                "finished tendency game session"
            );

            FinishResult {
                session_id: session.id,
                max_week: session.max_week,
                final_week,
                total_asset,
                realized_profit: session.realized_profit,
                total_yield,
                yield_above_threshold: total_yield >= self.config.yield_threshold,
                axes: tendency.axes,
                code: tendency.code,
                risk_profile: tendency.risk_profile,
                recommendation: tendency.risk_profile.recommendation().to_string(),
                decision_elapsed_seconds: elapsed_seconds,
                volatile_buy_count: session.volatile_buy_count,
                volatile_sell_count: session.volatile_sell_count,
                sell_dominant_week_count: session.sell_dominant_week_count,
                started_at: session.started_at,
                finished_at: now,
            }
        };

        self.results.record(user_id, &result).await?;
        Ok(result)
    }

    fn resolve(&self, session_id: u64) -> Result<Arc<Mutex<GameSession>>, GameError> {
        self.store.get(session_id).ok_or(GameError::SessionNotFound)
    }

    /// Lock a session and verify it belongs to the caller. Wrong owner
    /// reads the same as an absent session.
    fn lock_owned(
        handle: &Arc<Mutex<GameSession>>,
        user_id: u64,
    ) -> Result<MutexGuard<'_, GameSession>, GameError> {
        let guard = handle.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.user_id != user_id {
            return Err(GameError::SessionNotFound);
        }
        Ok(guard)
    }

    fn ensure_in_progress(session: &GameSession) -> Result<(), GameError> {
        if session.is_finished() {
            return Err(GameError::SessionFinished);
        }
        Ok(())
    }
}

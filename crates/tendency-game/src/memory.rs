//! In-process collaborator implementations.
//!
//! Reference behavior for the collaborator traits, and the doubles the
//! engine tests are wired with.

use async_trait::async_trait;
use game_core::{
    ChartDataSource, ChartDefinition, FinishResult, GameError, PricePoint, ResultSink,
    UserDirectory,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

/// Chart catalog backed by fixed in-memory timelines
#[derive(Default)]
pub struct InMemoryChartSource {
    charts: Vec<(ChartDefinition, Vec<PricePoint>)>,
}

impl InMemoryChartSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chart(mut self, definition: ChartDefinition, timeline: Vec<PricePoint>) -> Self {
        self.charts.push((definition, timeline));
        self
    }
}

#[async_trait]
impl ChartDataSource for InMemoryChartSource {
    async fn definitions(&self) -> Result<Vec<ChartDefinition>, GameError> {
        Ok(self.charts.iter().map(|(d, _)| d.clone()).collect())
    }

    async fn timeline(&self, definition: &ChartDefinition) -> Result<Vec<PricePoint>, GameError> {
        self.charts
            .iter()
            .find(|(d, _)| d.ticker == definition.ticker && d.start_date == definition.start_date)
            .map(|(_, timeline)| timeline.clone())
            .ok_or_else(|| {
                GameError::DataSource(format!("no timeline loaded for {}", definition.ticker))
            })
    }
}

/// Directory accepting a fixed set of user identifiers
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: HashSet<u64>,
}

impl InMemoryUserDirectory {
    pub fn with_users(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            users: ids.into_iter().collect(),
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn verify(&self, user_id: u64) -> Result<(), GameError> {
        if self.users.contains(&user_id) {
            Ok(())
        } else {
            Err(GameError::UserNotFound)
        }
    }
}

/// Result sink keeping every recorded score per user, in record order
#[derive(Default)]
pub struct InMemoryResultSink {
    results: Mutex<HashMap<u64, Vec<FinishResult>>>,
}

#[async_trait]
impl ResultSink for InMemoryResultSink {
    async fn record(&self, user_id: u64, result: &FinishResult) -> Result<(), GameError> {
        self.results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(user_id)
            .or_default()
            .push(result.clone());
        Ok(())
    }

    async fn latest_for_user(&self, user_id: u64) -> Result<Option<FinishResult>, GameError> {
        Ok(self
            .results
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user_id)
            .and_then(|v| v.last().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{score, ScoringInputs};
    use chrono::Utc;
    use game_core::RiskProfile;

    fn finish_result(session_id: u64) -> FinishResult {
        let tendency = score(ScoringInputs {
            elapsed_seconds: 10,
            volatile_trade_count: 0,
            sell_dominant_week_count: 0,
            total_yield: 1.0,
        });
        let now = Utc::now();
        FinishResult {
            session_id,
            max_week: 10,
            final_week: 10,
            total_asset: 1_010_000,
            realized_profit: 10_000,
            total_yield: 1.0,
            yield_above_threshold: false,
            axes: tendency.axes,
            code: tendency.code,
            risk_profile: RiskProfile::Balanced,
            recommendation: RiskProfile::Balanced.recommendation().to_string(),
            decision_elapsed_seconds: 10,
            volatile_buy_count: 0,
            volatile_sell_count: 0,
            sell_dominant_week_count: 0,
            started_at: now,
            finished_at: now,
        }
    }

    #[tokio::test]
    async fn sink_returns_most_recent_result() {
        let sink = InMemoryResultSink::default();
        sink.record(1, &finish_result(1)).await.unwrap();
        sink.record(1, &finish_result(2)).await.unwrap();

        let latest = sink.latest_for_user(1).await.unwrap().unwrap();
        assert_eq!(latest.session_id, 2);
        assert!(sink.latest_for_user(9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn directory_rejects_unknown_users() {
        let directory = InMemoryUserDirectory::with_users([1, 2]);
        assert!(directory.verify(2).await.is_ok());
        assert!(matches!(
            directory.verify(3).await.unwrap_err(),
            GameError::UserNotFound
        ));
    }
}

//! Week Sampler
//!
//! Downsamples a raw daily price timeline into a fixed number of weekly
//! snapshots with derived price-change statistics.

use crate::narrative;
use chrono::Duration;
use game_core::{GameError, PricePoint, WeekSnapshot};

/// Downsample `timeline` into `week_count` weekly snapshots.
///
/// Sampling stride is `timeline.len() / week_count`; week `i` takes the
/// point at `i * stride`. Change figures compare consecutive sampled
/// closes, with week 1 pinned at zero change.
pub fn sample_weeks(
    timeline: &[PricePoint],
    week_count: u32,
) -> Result<Vec<WeekSnapshot>, GameError> {
    let step = timeline.len() / week_count.max(1) as usize;
    if week_count == 0 || step == 0 {
        return Err(GameError::InsufficientData(format!(
            "timeline has {} points, need at least {} to sample {} weeks",
            timeline.len(),
            week_count,
            week_count
        )));
    }

    let mut weeks = Vec::with_capacity(week_count as usize);
    for i in 0..week_count as usize {
        let current = &timeline[i * step];
        let close = current.close;
        let previous = if i == 0 {
            close
        } else {
            timeline[(i - 1) * step].close
        };
        let change = close - previous;
        let change_rate = if previous == 0 {
            0.0
        } else {
            change as f64 * 100.0 / previous as f64
        };

        let week_index = i as u32 + 1;
        weeks.push(WeekSnapshot {
            week_index,
            start_date: current.date,
            end_date: current.date + Duration::days(6),
            close_price: close,
            change_price: change,
            change_rate,
            keywords: narrative::keywords(week_index),
            news: narrative::news(current.date, week_index),
        });
    }
    Ok(weeks)
}

//! Scoring Module
//!
//! Converts the behavioral counters accumulated over a session into the
//! four-axis tendency score and the coarse risk-profile label.
//!
//! The linear formulas and clamp bounds are product-tuned constants, not
//! derived from a model; keep them bit-for-bit stable.

use game_core::{RiskProfile, TendencyAxes};
use serde::{Deserialize, Serialize};

/// Yield pivot for the J/P axis and the "above threshold" flag
pub const BASE_YIELD: f64 = 3.0;
/// Yield at or above which the profile turns aggressive
const AGGRESSIVE_YIELD: f64 = 5.0;
/// Volatile-trade count at or above which the profile turns aggressive
const AGGRESSIVE_VOLATILE_TRADES: u32 = 6;
/// Sell-dominant week count at or above which the profile turns defensive
const DEFENSIVE_SELL_WEEKS: u32 = 5;

/// Counters a finished session feeds into the scorer
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringInputs {
    pub elapsed_seconds: i64,
    pub volatile_trade_count: u32,
    pub sell_dominant_week_count: u32,
    pub total_yield: f64,
}

/// Complete tendency classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TendencyScore {
    pub axes: TendencyAxes,
    /// Four-letter code, ties resolving I, S, F, J
    pub code: String,
    pub risk_profile: RiskProfile,
}

/// Score a finished session.
///
/// Every axis pair is complementary: i+e, s+n, t+f and j+p each sum to
/// exactly 100.
pub fn score(inputs: ScoringInputs) -> TendencyScore {
    let i = clamp_axis(inputs.volatile_trade_count as i64 * 10 + 10);
    let e = 100 - i;

    let s = clamp_axis(inputs.elapsed_seconds / 2);
    let n = 100 - s;

    let f = clamp_axis(inputs.sell_dominant_week_count as i64 * 10);
    let t = 100 - f;

    // clamped in f64 first, then truncated toward zero, never rounded
    let j = ((BASE_YIELD - inputs.total_yield) * 10.0).clamp(0.0, 100.0) as i32;
    let p = 100 - j;

    let mut code = String::with_capacity(4);
    code.push(if e > i { 'E' } else { 'I' });
    code.push(if s >= n { 'S' } else { 'N' });
    code.push(if t > f { 'T' } else { 'F' });
    code.push(if j >= p { 'J' } else { 'P' });

    TendencyScore {
        axes: TendencyAxes { i, e, s, n, t, f, j, p },
        code,
        risk_profile: resolve_risk_profile(
            inputs.total_yield,
            inputs.volatile_trade_count,
            inputs.sell_dominant_week_count,
        ),
    }
}

/// Risk-profile label; rules evaluate in order, first match wins
pub fn resolve_risk_profile(
    total_yield: f64,
    volatile_trade_count: u32,
    sell_dominant_week_count: u32,
) -> RiskProfile {
    if total_yield >= AGGRESSIVE_YIELD || volatile_trade_count >= AGGRESSIVE_VOLATILE_TRADES {
        return RiskProfile::Aggressive;
    }
    if sell_dominant_week_count >= DEFENSIVE_SELL_WEEKS || total_yield < 0.0 {
        return RiskProfile::Defensive;
    }
    RiskProfile::Balanced
}

fn clamp_axis(value: i64) -> i32 {
    value.clamp(0, 100) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(
        elapsed_seconds: i64,
        volatile_trade_count: u32,
        sell_dominant_week_count: u32,
        total_yield: f64,
    ) -> ScoringInputs {
        ScoringInputs {
            elapsed_seconds,
            volatile_trade_count,
            sell_dominant_week_count,
            total_yield,
        }
    }

    #[test]
    fn axis_pairs_always_sum_to_100() {
        let grid = [
            inputs(0, 0, 0, 0.0),
            inputs(1, 3, 2, 4.5),
            inputs(500, 20, 12, -80.0),
            inputs(7, 1, 9, 250.0),
            inputs(i64::from(u32::MAX), 0, 0, 3.0),
        ];
        for input in grid {
            let result = score(input);
            let a = result.axes;
            assert_eq!(a.i + a.e, 100, "i/e for {:?}", input);
            assert_eq!(a.s + a.n, 100, "s/n for {:?}", input);
            assert_eq!(a.t + a.f, 100, "t/f for {:?}", input);
            assert_eq!(a.j + a.p, 100, "j/p for {:?}", input);
        }
    }

    #[test]
    fn volatile_trades_drive_the_introversion_axis() {
        assert_eq!(score(inputs(0, 0, 0, 0.0)).axes.i, 10);
        assert_eq!(score(inputs(0, 4, 0, 0.0)).axes.i, 50);
        // clamped at 100
        assert_eq!(score(inputs(0, 42, 0, 0.0)).axes.i, 100);
    }

    #[test]
    fn elapsed_time_drives_the_sensing_axis() {
        assert_eq!(score(inputs(0, 0, 0, 0.0)).axes.s, 0);
        assert_eq!(score(inputs(61, 0, 0, 0.0)).axes.s, 30);
        assert_eq!(score(inputs(100_000, 0, 0, 0.0)).axes.s, 100);
    }

    #[test]
    fn yield_drives_the_judging_axis_with_truncation() {
        // (3.0 - 0.55) * 10 = 24.5, truncated to 24
        assert_eq!(score(inputs(0, 0, 0, 0.55)).axes.j, 24);
        assert_eq!(score(inputs(0, 0, 0, 3.0)).axes.j, 0);
        assert_eq!(score(inputs(0, 0, 0, -50.0)).axes.j, 100);
    }

    #[test]
    fn code_ties_resolve_toward_i_s_f_j() {
        // all axes at 50/50
        let result = score(inputs(100, 4, 5, -2.0));
        assert_eq!(result.axes.i, 50);
        assert_eq!(result.axes.s, 50);
        assert_eq!(result.axes.f, 50);
        assert_eq!(result.axes.j, 50);
        assert_eq!(result.code, "ISFJ");
    }

    #[test]
    fn fast_quiet_profitable_play_codes_entp() {
        let result = score(inputs(1, 1, 0, 0.0));
        assert_eq!(result.code, "ENTP");
    }

    #[test]
    fn risk_profile_rules_apply_in_order() {
        assert_eq!(resolve_risk_profile(5.0, 0, 0), RiskProfile::Aggressive);
        assert_eq!(resolve_risk_profile(0.0, 6, 0), RiskProfile::Aggressive);
        // aggressive wins even when a defensive rule also matches
        assert_eq!(resolve_risk_profile(-1.0, 7, 9), RiskProfile::Aggressive);
        assert_eq!(resolve_risk_profile(0.0, 0, 5), RiskProfile::Defensive);
        assert_eq!(resolve_risk_profile(-0.1, 0, 0), RiskProfile::Defensive);
        assert_eq!(resolve_risk_profile(4.9, 5, 4), RiskProfile::Balanced);
    }
}

//! Point/rate solver: the fewest points that meet an earnings goal.
//!
//! Earnings depend on the rate tier the cycle total lands in, and on a flat
//! bonus paid per day once that day's points reach a minimum. The solver
//! inverts that relation by trying each (tier, bonus) assumption in a fixed
//! order and keeping the first whose answer actually lands in the tier it
//! assumed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rates::{Rate, BONUS_RATE_THRESHOLD, FLAT_BONUS, FLAT_BONUS_MIN_POINTS};

/// Which assumption produced a [`PointTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SolveBranch {
    /// Bonus rate, flat bonus earned every day
    BonusWithFlat,
    /// Bonus rate, no flat bonus
    Bonus,
    /// Standard rate, flat bonus earned every day
    StandardWithFlat,
    /// Standard rate, no flat bonus
    Standard,
    /// No assumption was self-consistent; bonus rate without flat bonus
    Fallback,
    /// Zero or negative days; nothing to plan
    NoDays,
}

impl SolveBranch {
    /// Whether the daily flat bonus was counted toward the goal.
    pub fn assumes_flat_bonus(self) -> bool {
        matches!(self, SolveBranch::BonusWithFlat | SolveBranch::StandardWithFlat)
    }
}

/// Points required for a goal and the rate tier they were solved under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointTarget {
    pub required_points: u64,
    pub rate: Rate,
    pub branch: SolveBranch,
}

impl PointTarget {
    fn none() -> Self {
        Self {
            required_points: 0,
            rate: Rate::Standard,
            branch: SolveBranch::NoDays,
        }
    }
}

struct Trial {
    rate: Rate,
    with_flat_bonus: bool,
    branch: SolveBranch,
}

/// Tried in order; the first self-consistent one wins.
const TRIALS: [Trial; 4] = [
    Trial {
        rate: Rate::Bonus,
        with_flat_bonus: true,
        branch: SolveBranch::BonusWithFlat,
    },
    Trial {
        rate: Rate::Bonus,
        with_flat_bonus: false,
        branch: SolveBranch::Bonus,
    },
    Trial {
        rate: Rate::Standard,
        with_flat_bonus: true,
        branch: SolveBranch::StandardWithFlat,
    },
    Trial {
        rate: Rate::Standard,
        with_flat_bonus: false,
        branch: SolveBranch::Standard,
    },
];

const FALLBACK: Trial = Trial {
    rate: Rate::Bonus,
    with_flat_bonus: false,
    branch: SolveBranch::Fallback,
};

impl Trial {
    /// Unrounded points needed under this trial's assumptions.
    fn raw_points(&self, goal: f64, days: f64) -> f64 {
        let per_day_bonus = if self.with_flat_bonus {
            FLAT_BONUS as f64
        } else {
            0.0
        };
        (goal - days * per_day_bonus) / self.rate.per_point() as f64
    }

    /// The answer must fall in the tier it assumed, and a flat bonus
    /// assumption needs a daily pace of at least the bonus minimum.
    fn accepts(&self, points: f64, days: f64) -> bool {
        let threshold = BONUS_RATE_THRESHOLD as f64;
        let in_tier = match self.rate {
            Rate::Bonus => points > threshold,
            Rate::Standard => points <= threshold,
        };
        in_tier && (!self.with_flat_bonus || points / days >= FLAT_BONUS_MIN_POINTS as f64)
    }

    fn target(&self, points: f64) -> PointTarget {
        PointTarget {
            required_points: round_up(points),
            rate: self.rate,
            branch: self.branch,
        }
    }
}

/// Round a point count up to a whole, non-negative number.
fn round_up(points: f64) -> u64 {
    if points.is_nan() || points <= 0.0 {
        0
    } else {
        points.ceil() as u64
    }
}

/// Solve for the points needed to reach `goal_amount` over `available_days`.
///
/// Zero or negative days admit no plan and yield zero points at the
/// standard rate.
pub fn solve(goal_amount: f64, available_days: i64) -> PointTarget {
    if available_days <= 0 {
        return PointTarget::none();
    }
    let days = available_days as f64;

    for trial in &TRIALS {
        let points = trial.raw_points(goal_amount, days);
        if trial.accepts(points, days) {
            debug!(goal_amount, available_days, points, branch = ?trial.branch, "solver accepted trial");
            return trial.target(points);
        }
    }

    let points = FALLBACK.raw_points(goal_amount, days);
    debug!(goal_amount, available_days, points, "solver fell back");
    FALLBACK.target(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_goal_uses_bonus_with_flat() {
        // (5000 - 700) / 40 = 107.5
        let t = solve(5000.0, 7);
        assert_eq!(t.required_points, 108);
        assert_eq!(t.rate, Rate::Bonus);
        assert_eq!(t.branch, SolveBranch::BonusWithFlat);
    }

    #[test]
    fn test_small_goal_uses_standard() {
        // Flat-bonus trials go negative; 400 / 20 = 20 fits the standard tier
        let t = solve(400.0, 7);
        assert_eq!(t.required_points, 20);
        assert_eq!(t.rate, Rate::Standard);
        assert_eq!(t.branch, SolveBranch::Standard);
    }

    #[test]
    fn test_bonus_without_flat_when_pace_too_low() {
        // (1200 - 1400) / 40 < 0, but 1200 / 40 = 30 > 24
        let t = solve(1200.0, 14);
        assert_eq!(t.required_points, 30);
        assert_eq!(t.branch, SolveBranch::Bonus);
    }

    #[test]
    fn test_standard_with_flat() {
        // (500 - 100) / 20 = 20, pace 20/day
        let t = solve(500.0, 1);
        assert_eq!(t.required_points, 20);
        assert_eq!(t.rate, Rate::Standard);
        assert_eq!(t.branch, SolveBranch::StandardWithFlat);
    }

    #[test]
    fn test_fallback_between_tiers() {
        // 700 over 1 day: 15 (bonus+flat) too low, 17.5 too low,
        // 30 (standard+flat) too high, 35 too high
        let t = solve(700.0, 1);
        assert_eq!(t.required_points, 18);
        assert_eq!(t.rate, Rate::Bonus);
        assert_eq!(t.branch, SolveBranch::Fallback);
    }

    #[test]
    fn test_threshold_is_strict_for_bonus() {
        // 960 / 40 = 24 exactly: not above the threshold
        let t = solve(960.0, 10);
        assert_ne!(t.branch, SolveBranch::Bonus);
        // 961 / 40 = 24.025
        let t = solve(961.0, 10);
        assert_eq!(t.branch, SolveBranch::Bonus);
        assert_eq!(t.required_points, 25);
    }

    #[test]
    fn test_non_positive_days() {
        for days in [0, -3] {
            let t = solve(5000.0, days);
            assert_eq!(t.required_points, 0);
            assert_eq!(t.rate, Rate::Standard);
            assert_eq!(t.branch, SolveBranch::NoDays);
        }
    }

    #[test]
    fn test_never_negative() {
        let t = solve(-500.0, 3);
        assert_eq!(t.required_points, 0);
        let t = solve(f64::NAN, 3);
        assert_eq!(t.required_points, 0);
    }
}

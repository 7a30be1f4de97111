//! Currency earned for a point total.

use crate::rates::{Rate, FLAT_BONUS, FLAT_BONUS_MIN_POINTS};

/// Earnings for `points` at `rate`, plus the flat bonus once the total
/// reaches [`FLAT_BONUS_MIN_POINTS`].
///
/// The bonus is added once to whatever total is passed in; callers decide
/// whether that is a single day's target or a whole cycle.
pub fn estimate(points: u64, rate: Rate) -> u64 {
    let bonus = if points >= FLAT_BONUS_MIN_POINTS {
        FLAT_BONUS
    } else {
        0
    };
    points.saturating_mul(rate.per_point()).saturating_add(bonus)
}

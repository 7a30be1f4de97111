//! Error types for cycle and plan calculations.

use thiserror::Error;

/// Input-validation failures surfaced to the caller.
///
/// None of these are runtime faults: the caller re-prompts and nothing
/// has been computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("goal amount must be a positive number, got {0}")]
    NonPositiveGoal(f64),

    #[error("available days must be a positive whole number, got {0}")]
    NonPositiveDays(i64),

    #[error("available days ({requested}) exceed the {remaining} days left in this cycle")]
    DaysExceedCycle { requested: i64, remaining: u32 },

    #[error("points already earned cannot be negative, got {0}")]
    NegativePointsEarned(i64),

    #[error("no days of this cycle have passed yet, so {0} earned points is not possible")]
    PointsWithoutElapsedDays(i64),

    #[error("unknown point rate {0} (expected 20 or 40)")]
    UnknownRate(u64),

    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

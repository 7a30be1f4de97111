//! payplan-core: pay cycle windowing and the point/rate/earning engine.
//!
//! Everything here is a pure function of its inputs: no I/O, no shared state.

pub mod cycle;
pub mod earning;
pub mod error;
pub mod plan;
pub mod rates;
pub mod solver;
pub mod time;

pub use cycle::{resolve as resolve_cycle, PayCycle};
pub use earning::estimate as estimate_earning;
pub use error::PlanError;
pub use plan::{plan, plan_for_cycle, CalculationInput, CalculationResult, CycleReport};
pub use rates::{
    Rate, BONUS_RATE, BONUS_RATE_THRESHOLD, FLAT_BONUS, FLAT_BONUS_MIN_POINTS, STANDARD_RATE,
};
pub use solver::{solve as solve_target, PointTarget, SolveBranch};
pub use time::{format_day, local_date, parse_date, parse_timezone, today_in};

//! Planning: goal + available days + points already earned into a daily plan.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cycle::{self, PayCycle};
use crate::earning;
use crate::error::PlanError;
use crate::rates::{Rate, BONUS_RATE_THRESHOLD};
use crate::solver::{self, SolveBranch};

/// Raw user inputs for one calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub goal_amount: f64,
    pub available_days: i64,
    #[serde(default)]
    pub points_already_earned: i64,
}

impl CalculationInput {
    pub fn new(goal_amount: f64, available_days: i64) -> Self {
        Self {
            goal_amount,
            available_days,
            points_already_earned: 0,
        }
    }

    pub fn with_points_earned(mut self, points: i64) -> Self {
        self.points_already_earned = points;
        self
    }

    /// Cycle-independent checks.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !self.goal_amount.is_finite() || self.goal_amount <= 0.0 {
            return Err(PlanError::NonPositiveGoal(self.goal_amount));
        }
        if self.available_days <= 0 {
            return Err(PlanError::NonPositiveDays(self.available_days));
        }
        if self.points_already_earned < 0 {
            return Err(PlanError::NegativePointsEarned(self.points_already_earned));
        }
        Ok(())
    }

    /// Checks against the cycle `today` falls in: the days must fit in what
    /// is left of it, and points can only have been earned on past days.
    pub fn validate_for_cycle(&self, cycle: &PayCycle, today: NaiveDate) -> Result<(), PlanError> {
        self.validate()?;

        let remaining = cycle.remaining_days(today);
        if self.available_days > i64::from(remaining) {
            return Err(PlanError::DaysExceedCycle {
                requested: self.available_days,
                remaining,
            });
        }
        if cycle.elapsed_days(today) == 0 && self.points_already_earned > 0 {
            return Err(PlanError::PointsWithoutElapsedDays(self.points_already_earned));
        }
        Ok(())
    }
}

/// Outcome of a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Points needed over the whole cycle to meet the goal
    pub required_points: u64,
    /// Rate tier the solver assumed
    pub base_rate: Rate,
    pub branch: SolveBranch,
    pub points_already_earned: u64,
    /// Points still to earn
    pub remaining_points: u64,
    /// Earned + remaining; never below `required_points`
    pub final_total_points: u64,
    pub final_rate: Rate,
    pub daily_points_target: u64,
    pub daily_earning_estimate: u64,
}

impl CalculationResult {
    /// True once the cycle total earns the bonus rate.
    pub fn bonus_rate_unlocked(&self) -> bool {
        self.final_total_points > BONUS_RATE_THRESHOLD
    }
}

/// Run a calculation after cycle-independent validation.
pub fn plan(input: &CalculationInput) -> Result<CalculationResult, PlanError> {
    input.validate()?;
    Ok(compute(
        input.goal_amount,
        input.available_days,
        input.points_already_earned.unsigned_abs(),
    ))
}

fn compute(goal_amount: f64, available_days: i64, earned: u64) -> CalculationResult {
    let target = solver::solve(goal_amount, available_days);

    let remaining = target.required_points.saturating_sub(earned);
    let final_total = earned + remaining;
    let final_rate = Rate::for_total(final_total, target.rate);

    let days = available_days.unsigned_abs();
    let daily = if remaining > 0 && days > 0 {
        remaining.div_ceil(days)
    } else {
        0
    };
    let daily_earning = earning::estimate(daily, final_rate);

    debug!(
        required = target.required_points,
        earned,
        remaining,
        daily,
        daily_earning,
        "computed plan"
    );

    CalculationResult {
        required_points: target.required_points,
        base_rate: target.rate,
        branch: target.branch,
        points_already_earned: earned,
        remaining_points: remaining,
        final_total_points: final_total,
        final_rate,
        daily_points_target: daily,
        daily_earning_estimate: daily_earning,
    }
}

/// A plan together with the cycle it was made for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub today: NaiveDate,
    pub cycle: PayCycle,
    pub remaining_days: u32,
    pub elapsed_days: u32,
    pub input: CalculationInput,
    pub result: CalculationResult,
}

/// Resolve the cycle for `today`, validate the input against it and plan.
pub fn plan_for_cycle(input: &CalculationInput, today: NaiveDate) -> Result<CycleReport, PlanError> {
    let cycle = cycle::resolve(today);
    input.validate_for_cycle(&cycle, today)?;
    let result = plan(input)?;

    Ok(CycleReport {
        today,
        cycle,
        remaining_days: cycle.remaining_days(today),
        elapsed_days: cycle.elapsed_days(today),
        input: *input,
        result,
    })
}

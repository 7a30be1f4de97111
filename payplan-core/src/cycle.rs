//! Pay cycle windowing.
//!
//! Every month is split into four fixed periods: days 1-7, 8-14, 15-21 and
//! 22 through the last day of the month (28-31 depending on the month).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::time::format_day;

/// First day of the period that runs to the end of the month.
const MONTH_END_START: u32 = 22;

/// The pay period enclosing a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayCycle {
    /// Day of month the period starts on
    pub start: u32,
    /// Day of month the period ends on (inclusive)
    pub end: u32,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// Resolve the pay cycle containing `today`.
pub fn resolve(today: NaiveDate) -> PayCycle {
    let day = today.day();
    let (start, end) = match day {
        1..=7 => (1, 7),
        8..=14 => (8, 14),
        15..=21 => (15, 21),
        _ => (MONTH_END_START, last_day_of_month(today).day()),
    };

    PayCycle {
        start,
        end,
        period_start: today.with_day(start).unwrap_or(today),
        period_end: today.with_day(end).unwrap_or(today),
    }
}

/// Last calendar day of the month `date` falls in.
fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    // Day 28 exists in every month, so this always finds a day
    (28..=31).rev().find_map(|d| date.with_day(d)).unwrap_or(date)
}

impl PayCycle {
    /// Whether `date` falls inside this period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.period_start && date <= self.period_end
    }

    /// Days left in the period, counting `today` itself.
    ///
    /// Returns 0 when `today` is outside the period.
    pub fn remaining_days(&self, today: NaiveDate) -> u32 {
        if !self.contains(today) {
            return 0;
        }
        self.end - today.day() + 1
    }

    /// Days of the period already behind `today` (today excluded).
    pub fn elapsed_days(&self, today: NaiveDate) -> u32 {
        if !self.contains(today) {
            return 0;
        }
        today.day() - self.start
    }

    /// Total number of days in the period.
    pub fn len_days(&self) -> u32 {
        self.end - self.start + 1
    }

    /// The cycle that starts right after this one, rolling into the next month.
    pub fn next(&self) -> PayCycle {
        match self.period_end.succ_opt() {
            Some(day) => resolve(day),
            None => *self,
        }
    }

    /// True for the variable-length period running to the end of the month.
    pub fn is_month_end(&self) -> bool {
        self.start == MONTH_END_START
    }
}

impl fmt::Display for PayCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} – {}",
            format_day(self.period_start),
            format_day(self.period_end)
        )
    }
}

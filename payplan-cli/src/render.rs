use anyhow::{Context, Result};
use chrono::NaiveDate;
use payplan_core::{CycleReport, PayCycle, Rate};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::state::Session;

pub const TITLE: &str = "Daily Planner";
const DISCLAIMER: &str =
    "Note: This planner helps you estimate your daily points. Actual earnings may differ.";

/// Currency-aware text rendering of the planner views.
pub struct Renderer<'a> {
    pub currency: &'a str,
}

impl<'a> Renderer<'a> {
    pub fn new(currency: &'a str) -> Self {
        Self { currency }
    }

    pub fn pill(&self, session: &Session) -> String {
        format!("ID: {} | Name: {}", session.id, session.display_name())
    }

    /// Pay cycle box plus the remaining-days hint.
    pub fn cycle(&self, cycle: &PayCycle, today: NaiveDate) -> String {
        let mut s = String::new();
        let _ = writeln!(s, "Your Pay Cycle");
        if cycle.is_month_end() {
            let _ = writeln!(s, "  {cycle} (last cycle of the month, {} days)", cycle.len_days());
        } else {
            let _ = writeln!(s, "  {cycle}");
        }
        let remaining = cycle.remaining_days(today);
        let _ = writeln!(
            s,
            "You have {remaining} {} left in this cycle.",
            plural(remaining, "day", "days")
        );
        let elapsed = cycle.elapsed_days(today);
        if elapsed == 0 {
            let _ = writeln!(s, "No past days yet in this cycle.");
        } else {
            let _ = writeln!(
                s,
                "Points earned so far cover the last {elapsed} {}.",
                plural(elapsed, "day", "days")
            );
        }
        s
    }

    /// The results view: summary, daily tiles, rate banner.
    pub fn plan(&self, report: &CycleReport, session: Option<&Session>) -> String {
        let r = &report.result;
        let mut s = String::new();

        let _ = writeln!(s, "Your Daily Plan");
        if let Some(session) = session {
            let _ = writeln!(s, "{}", self.pill(session));
        }
        let _ = writeln!(s, "Pay cycle: {}", report.cycle);
        let _ = writeln!(s);

        let _ = writeln!(s, "Payout Cycle Summary");
        let rows = [
            ("Total Points Needed", r.required_points),
            ("Points Completed", r.points_already_earned),
            ("Points Still Required", r.remaining_points),
        ];
        for (label, value) in rows {
            let _ = writeln!(s, "  {label:<24}{value:>8}");
        }
        let _ = writeln!(s);

        let _ = writeln!(s, "  {:<24}{:>8}", "Daily Target Points", r.daily_points_target);
        let earning = format!("{}{}", self.currency, r.daily_earning_estimate);
        let _ = writeln!(s, "  {:<24}{:>8}", "Expected Daily Earnings", earning);

        if r.bonus_rate_unlocked() {
            let _ = writeln!(s);
            let _ = writeln!(
                s,
                "You unlocked the higher rate: {}{} per point!",
                self.currency,
                Rate::Bonus
            );
        }

        let _ = writeln!(s);
        let _ = writeln!(s, "{DISCLAIMER}");
        s
    }
}

fn plural<'s>(n: u32, one: &'s str, many: &'s str) -> &'s str {
    if n == 1 { one } else { many }
}

/// Write a rendered view to `path`.
pub fn export(path: &Path, text: &str) -> Result<()> {
    fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use payplan_core::{plan_for_cycle, resolve_cycle, CalculationInput};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn session() -> Session {
        Session {
            id: "66123456".to_string(),
            name: String::new(),
            logged_in_at_utc: Utc.with_ymd_and_hms(2024, 2, 10, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_cycle_box() {
        let today = date(2024, 2, 10);
        let text = Renderer::new("₹").cycle(&resolve_cycle(today), today);
        assert!(text.contains("Feb 8 – Feb 14"));
        assert!(text.contains("You have 5 days left in this cycle."));
        assert!(text.contains("last 2 days"));

        assert!(!text.contains("last cycle of the month"));

        let tail = date(2024, 2, 25);
        let text = Renderer::new("₹").cycle(&resolve_cycle(tail), tail);
        assert!(text.contains("Feb 22 – Feb 29 (last cycle of the month, 8 days)"));

        let first = date(2024, 2, 1);
        let text = Renderer::new("₹").cycle(&resolve_cycle(first), first);
        assert!(text.contains("No past days yet"));
    }

    #[test]
    fn test_plan_view_with_banner() {
        let today = date(2024, 2, 8);
        let report = plan_for_cycle(&CalculationInput::new(5000.0, 7), today).unwrap();
        let text = Renderer::new("₹").plan(&report, Some(&session()));

        assert!(text.contains("ID: 66123456 | Name: —"));
        assert!(text.contains("Total Points Needed"));
        assert!(text.contains("108"));
        assert!(text.contains("₹740"));
        assert!(text.contains("You unlocked the higher rate: ₹40 per point!"));
    }

    #[test]
    fn test_plan_view_without_banner() {
        let today = date(2024, 2, 8);
        let report = plan_for_cycle(&CalculationInput::new(400.0, 7), today).unwrap();
        let text = Renderer::new("$").plan(&report, None);
        assert!(text.contains("$160"));
        assert!(!text.contains("higher rate"));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.txt");
        export(&path, "hello").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "hello");
    }
}

//! Interactive planner: LoggedOut → AwaitingInput → ShowingResult.
//!
//! Every run starts logged out; nothing here touches the stored session.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use payplan_core::{plan_for_cycle, resolve_cycle, CalculationInput, CycleReport};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

use crate::login::LoginGate;
use crate::render::{self, Renderer, TITLE};
use crate::state::{LoginAttempts, Session};

#[derive(Debug)]
enum View {
    LoggedOut,
    AwaitingInput(Session),
    ShowingResult(Session, Box<CycleReport>),
    Done,
}

pub struct Interactive<'a, R, W> {
    input: R,
    out: W,
    gate: &'a LoginGate,
    renderer: Renderer<'a>,
    export_path: PathBuf,
    today: NaiveDate,
    attempts: LoginAttempts,
}

impl<'a, R: BufRead, W: Write> Interactive<'a, R, W> {
    pub fn new(
        input: R,
        out: W,
        gate: &'a LoginGate,
        renderer: Renderer<'a>,
        export_path: PathBuf,
        today: NaiveDate,
    ) -> Self {
        Self {
            input,
            out,
            gate,
            renderer,
            export_path,
            today,
            attempts: LoginAttempts::default(),
        }
    }

    pub fn run(mut self) -> Result<()> {
        let mut view = View::LoggedOut;
        loop {
            view = match view {
                View::LoggedOut => self.login_view()?,
                View::AwaitingInput(session) => self.input_view(session)?,
                View::ShowingResult(session, report) => self.result_view(session, report)?,
                View::Done => return Ok(()),
            };
        }
    }

    /// Print `label` and read one trimmed line. `None` on end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}: ")?;
        self.out.flush()?;
        let mut s = String::new();
        if self.input.read_line(&mut s)? == 0 {
            return Ok(None);
        }
        Ok(Some(s.trim().to_string()))
    }

    fn login_view(&mut self) -> Result<View> {
        writeln!(self.out, "{TITLE}\n")?;
        let Some(id) = self.prompt("ID")? else {
            return Ok(View::Done);
        };
        let Some(name) = self.prompt("Your name (optional)")? else {
            return Ok(View::Done);
        };

        match self.gate.attempt(&mut self.attempts, &id, &name, Utc::now()) {
            Ok(session) => Ok(View::AwaitingInput(session)),
            Err(e) => {
                writeln!(self.out, "{e}\n")?;
                Ok(View::LoggedOut)
            }
        }
    }

    fn input_view(&mut self, session: Session) -> Result<View> {
        let cycle = resolve_cycle(self.today);
        let remaining = cycle.remaining_days(self.today);
        let elapsed = cycle.elapsed_days(self.today);

        writeln!(self.out, "\n{}", self.renderer.pill(&session))?;
        write!(self.out, "{}", self.renderer.cycle(&cycle, self.today))?;

        let label = format!("Earning goal ({})", self.renderer.currency);
        let Some(goal) = self.prompt(&label)? else {
            return Ok(View::Done);
        };

        let earned = if elapsed == 0 {
            String::new()
        } else {
            let label = format!("Points earned (last {elapsed} days)");
            match self.prompt(&label)? {
                Some(s) => s,
                None => return Ok(View::Done),
            }
        };

        let Some(days) = self.prompt(&format!("Available days (max {remaining})"))? else {
            return Ok(View::Done);
        };

        let Some(input) = parse_input(&goal, &earned, &days) else {
            writeln!(self.out, "Enter valid numbers.")?;
            return Ok(View::AwaitingInput(session));
        };

        match plan_for_cycle(&input, self.today) {
            Ok(report) => Ok(View::ShowingResult(session, Box::new(report))),
            Err(e) => {
                writeln!(self.out, "{e}")?;
                Ok(View::AwaitingInput(session))
            }
        }
    }

    fn result_view(&mut self, session: Session, report: Box<CycleReport>) -> Result<View> {
        let text = self.renderer.plan(&report, Some(&session));
        writeln!(self.out, "\n{text}")?;

        loop {
            let Some(choice) = self.prompt("[b]ack, [e]xport, [q]uit")? else {
                return Ok(View::Done);
            };
            match choice.to_lowercase().as_str() {
                "b" | "back" => return Ok(View::AwaitingInput(session)),
                "e" | "export" => {
                    render::export(&self.export_path, &text)?;
                    writeln!(self.out, "Saved {}", self.export_path.display())?;
                }
                "q" | "quit" => return Ok(View::Done),
                other => debug!(choice = other, "unknown choice"),
            }
        }
    }
}

/// Parse the three input fields. An empty or unparsable earned-points field
/// counts as zero; goal and days must parse and be non-zero.
fn parse_input(goal: &str, earned: &str, days: &str) -> Option<CalculationInput> {
    let goal: f64 = goal.parse().ok().filter(|g: &f64| *g != 0.0)?;
    let days: i64 = days.parse().ok().filter(|d: &i64| *d != 0)?;
    let earned: i64 = earned.parse().unwrap_or(0);
    Some(CalculationInput::new(goal, days).with_points_earned(earned))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoginSection;
    use std::io::Cursor;

    fn run_session(today: NaiveDate, script: &str, export_path: PathBuf) -> String {
        let gate = LoginGate::new(&LoginSection::default()).unwrap();
        let mut out = Vec::new();
        Interactive::new(
            Cursor::new(script.to_string()),
            &mut out,
            &gate,
            Renderer::new("₹"),
            export_path,
            today,
        )
        .run()
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_input() {
        let i = parse_input("5000", "", "7").unwrap();
        assert_eq!(i.goal_amount, 5000.0);
        assert_eq!(i.points_already_earned, 0);
        assert_eq!(parse_input("5000", "abc", "7").unwrap().points_already_earned, 0);
        assert!(parse_input("", "", "7").is_none());
        assert!(parse_input("5000", "", "0").is_none());
    }

    #[test]
    fn test_full_flow_on_first_cycle_day() {
        let dir = tempfile::tempdir().unwrap();
        let export = dir.path().join("plan.txt");
        // First day of the cycle skips the earned-points prompt
        let script = "123\n\n66123456\nShyam\n5000\n7\ne\nq\n";
        let out = run_session(date(2024, 2, 8), script, export.clone());

        assert!(out.contains("Please enter a valid 8-digit ID"));
        assert!(out.contains("ID: 66123456 | Name: Shyam"));
        assert!(!out.contains("Points earned (last"));
        assert!(out.contains("₹740"));

        let saved = std::fs::read_to_string(export).unwrap();
        assert!(saved.contains("Your Daily Plan"));
    }

    #[test]
    fn test_rejects_days_beyond_cycle_then_recovers() {
        let dir = tempfile::tempdir().unwrap();
        // Feb 10: 5 days left, 2 elapsed
        let script = "66123456\n\n5000\n20\n9\n5000\n20\n5\nq\n";
        let out = run_session(date(2024, 2, 10), script, dir.path().join("p.txt"));

        assert!(out.contains("Points earned (last 2 days)"));
        assert!(out.contains("exceed the 5 days left"));
        assert!(out.contains("Your Daily Plan"));
    }

    #[test]
    fn test_back_returns_to_input() {
        let dir = tempfile::tempdir().unwrap();
        let script = "66123456\n\n400\n7\nb\n";
        let out = run_session(date(2024, 2, 1), script, dir.path().join("p.txt"));
        assert_eq!(out.matches("Your Pay Cycle").count(), 2);
    }
}

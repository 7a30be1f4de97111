use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use payplan_core::{parse_date, plan_for_cycle, resolve_cycle, today_in, CalculationInput};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod interactive;
mod login;
mod render;
mod state;

use config::{load_config, Config};
use login::LoginGate;
use render::Renderer;
use state::Session;

#[derive(Parser, Debug)]
#[command(
    name = "payplan",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("PAYPLAN_BUILD_SHA"), ")"),
    about = "Daily points planner for the current pay cycle"
)]
struct Cli {
    /// State directory (default: $PAYPLAN_HOME or ~/.payplan)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a session with an 8-digit ID starting with 66
    Login {
        #[arg(long)]
        id: String,

        /// Display name (optional)
        #[arg(long, default_value = "")]
        name: String,
    },

    /// End the current session
    Logout,

    /// Show the current session
    Whoami,

    /// Show the pay cycle for today (or --date)
    Cycle {
        /// Date as YYYY-MM-DD (default: today in the configured timezone)
        #[arg(long)]
        date: Option<String>,
    },

    /// Compute the daily target for an earnings goal
    Plan {
        /// Earnings goal for this cycle
        #[arg(long, allow_negative_numbers = true)]
        goal: f64,

        /// Days you can work, up to the days left in the cycle
        #[arg(long, allow_negative_numbers = true)]
        days: i64,

        /// Points already earned earlier in this cycle
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        earned: i64,

        #[arg(long)]
        date: Option<String>,

        /// Print the report as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also write the rendered plan to this file
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Run the planner as a prompt-driven session
    Interactive {
        #[arg(long)]
        date: Option<String>,
    },

    /// Config file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config.toml if none exists
    Init,

    /// Print the effective config
    Show,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PAYPLAN_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let home = state::ensure_payplan_home(cli.home.as_deref())?;
    let cfg = load_config(&home)?;
    info!(home = %home.display(), timezone = %cfg.planner.timezone, "loaded config");

    match cli.command {
        Command::Login { id, name } => login(&home, &cfg, &id, &name)?,

        Command::Logout => {
            if state::clear_session(&home)? {
                println!("Logged out.");
            } else {
                println!("No active session.");
            }
        }

        Command::Whoami => {
            let session = require_session(&home)?;
            println!("{}", Renderer::new(&cfg.output.currency_symbol).pill(&session));
        }

        Command::Cycle { date } => {
            let today = resolve_today(&cfg, date.as_deref())?;
            let cycle = resolve_cycle(today);
            print!("{}", Renderer::new(&cfg.output.currency_symbol).cycle(&cycle, today));
        }

        Command::Plan {
            goal,
            days,
            earned,
            date,
            json,
            export,
        } => {
            let session = require_session(&home)?;
            let today = resolve_today(&cfg, date.as_deref())?;
            let input = CalculationInput::new(goal, days).with_points_earned(earned);
            let report = plan_for_cycle(&input, today)?;

            let text = Renderer::new(&cfg.output.currency_symbol).plan(&report, Some(&session));
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{text}");
            }

            if let Some(path) = export {
                render::export(&path, &text)?;
                eprintln!("Saved {}", path.display());
            }
        }

        Command::Interactive { date } => {
            let today = resolve_today(&cfg, date.as_deref())?;
            let gate = LoginGate::new(&cfg.login)?;
            let stdin = io::stdin();
            interactive::Interactive::new(
                stdin.lock(),
                io::stdout(),
                &gate,
                Renderer::new(&cfg.output.currency_symbol),
                PathBuf::from(&cfg.output.export_file),
                today,
            )
            .run()?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(&home)?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn login(home: &Path, cfg: &Config, id: &str, name: &str) -> Result<()> {
    let gate = LoginGate::new(&cfg.login)?;
    let mut attempts = state::read_attempts(home)?;

    let outcome = gate.attempt(&mut attempts, id, name, Utc::now());
    state::write_attempts(home, &attempts)?;

    let session = outcome?;
    state::write_session(home, &session)?;
    println!("Logged in. {}", Renderer::new(&cfg.output.currency_symbol).pill(&session));
    Ok(())
}

fn require_session(home: &Path) -> Result<Session> {
    match state::read_session(home)? {
        Some(session) => Ok(session),
        None => bail!("Not logged in. Run: payplan login --id <ID>"),
    }
}

/// `--date` when given, otherwise today in the configured timezone.
fn resolve_today(cfg: &Config, date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(d) => Ok(parse_date(d)?),
        None => today_in(&cfg.planner.timezone)
            .with_context(|| format!("resolving today in {}", cfg.planner.timezone)),
    }
}

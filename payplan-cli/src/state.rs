use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Display placeholder for a session without a name.
pub const NO_NAME: &str = "—";

/// `--home` wins, then `PAYPLAN_HOME`, then `~/.payplan`.
pub fn payplan_home(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Ok(dir) = std::env::var("PAYPLAN_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".payplan"))
}

pub fn ensure_payplan_home(override_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = payplan_home(override_dir)?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// The logged-in user. Issued after a format check only; carries no trust.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub logged_in_at_utc: DateTime<Utc>,
}

impl Session {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            NO_NAME
        } else {
            self.name.trim()
        }
    }
}

pub fn session_path(home: &Path) -> PathBuf {
    home.join("session.json")
}

pub fn read_session(home: &Path) -> Result<Option<Session>> {
    let p = session_path(home);
    if !p.exists() {
        return Ok(None);
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let session = serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    Ok(Some(session))
}

pub fn write_session(home: &Path, session: &Session) -> Result<()> {
    let p = session_path(home);
    let json = serde_json::to_string_pretty(session)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

/// Remove the session file. Returns whether one existed.
pub fn clear_session(home: &Path) -> Result<bool> {
    let p = session_path(home);
    if !p.exists() {
        return Ok(false);
    }
    fs::remove_file(&p).with_context(|| format!("remove {}", p.display()))?;
    Ok(true)
}

/// Consecutive failed login attempts.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LoginAttempts {
    pub failures: u32,
    pub last_failure_utc: Option<DateTime<Utc>>,
}

pub fn attempts_path(home: &Path) -> PathBuf {
    home.join("attempts.json")
}

pub fn read_attempts(home: &Path) -> Result<LoginAttempts> {
    let p = attempts_path(home);
    if !p.exists() {
        return Ok(LoginAttempts::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(serde_json::from_str(&s).with_context(|| format!("parse {}", p.display()))?)
}

pub fn write_attempts(home: &Path, attempts: &LoginAttempts) -> Result<()> {
    let p = attempts_path(home);
    let json = serde_json::to_string_pretty(attempts)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

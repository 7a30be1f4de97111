//! Login gate: an ID format check with a consecutive-failure lockout.
//!
//! This is not authentication. A passing ID only unlocks the planner views.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::LoginSection;
use crate::state::{LoginAttempts, Session};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("Please enter a valid 8-digit ID starting with 66.")]
    InvalidId,

    #[error("Too many failed attempts. Try again in {retry_in_secs}s.")]
    LockedOut { retry_in_secs: i64 },
}

pub struct LoginGate {
    id_re: Regex,
    max_attempts: u32,
    lockout: Duration,
}

impl LoginGate {
    pub fn new(cfg: &LoginSection) -> Result<Self> {
        let lockout = Duration::try_seconds(cfg.lockout_secs.max(0))
            .with_context(|| format!("login.lockout_secs {} is out of range", cfg.lockout_secs))?;
        Ok(Self {
            id_re: Regex::new(r"^66\d{6}$")?,
            max_attempts: cfg.max_attempts.max(1),
            lockout,
        })
    }

    pub fn is_valid_id(&self, id: &str) -> bool {
        self.id_re.is_match(id)
    }

    /// Refuse while a lockout is running.
    fn check_lockout(&self, attempts: &LoginAttempts, now: DateTime<Utc>) -> Result<(), LoginError> {
        if attempts.failures < self.max_attempts {
            return Ok(());
        }
        let Some(last) = attempts.last_failure_utc else {
            return Ok(());
        };
        // A lockout ending past the representable range never ends
        let Some(until) = last.checked_add_signed(self.lockout) else {
            return Err(LoginError::LockedOut {
                retry_in_secs: self.lockout.num_seconds().max(1),
            });
        };
        if now < until {
            let retry_in_secs = (until - now).num_seconds().max(1);
            return Err(LoginError::LockedOut { retry_in_secs });
        }
        Ok(())
    }

    /// Check `id`, updating `attempts`, and issue a session on success.
    pub fn attempt(
        &self,
        attempts: &mut LoginAttempts,
        id: &str,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Session, LoginError> {
        self.check_lockout(attempts, now)?;

        let id = id.trim();
        if !self.is_valid_id(id) {
            // A finished lockout starts a fresh count
            if attempts.failures >= self.max_attempts {
                attempts.failures = 0;
            }
            attempts.failures += 1;
            attempts.last_failure_utc = Some(now);
            warn!(failures = attempts.failures, "rejected login id");
            return Err(LoginError::InvalidId);
        }

        *attempts = LoginAttempts::default();
        info!("login accepted");
        Ok(Session {
            id: id.to_string(),
            name: name.trim().to_string(),
            logged_in_at_utc: now,
        })
    }
}

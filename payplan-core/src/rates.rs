//! Point-to-currency rate tiers and the flat bonus.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::PlanError;

/// Currency units per point below the bonus threshold.
pub const STANDARD_RATE: u64 = 20;
/// Currency units per point once a cycle total exceeds [`BONUS_RATE_THRESHOLD`].
pub const BONUS_RATE: u64 = 40;
/// Cycle point total that must be exceeded (strictly) to earn [`BONUS_RATE`].
pub const BONUS_RATE_THRESHOLD: u64 = 24;
/// One-time award once a point total reaches [`FLAT_BONUS_MIN_POINTS`].
pub const FLAT_BONUS: u64 = 100;
pub const FLAT_BONUS_MIN_POINTS: u64 = 3;

/// Rate tier. Serialized as its per-point value (20 or 40).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u64", try_from = "u64")]
pub enum Rate {
    Standard,
    Bonus,
}

impl Rate {
    /// Currency units earned per point at this tier
    pub const fn per_point(self) -> u64 {
        match self {
            Rate::Standard => STANDARD_RATE,
            Rate::Bonus => BONUS_RATE,
        }
    }

    /// Tier implied by a cycle total, keeping `base` unless the total
    /// crosses the bonus threshold.
    pub fn for_total(total_points: u64, base: Rate) -> Rate {
        if total_points > BONUS_RATE_THRESHOLD {
            Rate::Bonus
        } else {
            base
        }
    }
}

impl From<Rate> for u64 {
    fn from(rate: Rate) -> Self {
        rate.per_point()
    }
}

impl TryFrom<u64> for Rate {
    type Error = PlanError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            STANDARD_RATE => Ok(Rate::Standard),
            BONUS_RATE => Ok(Rate::Bonus),
            other => Err(PlanError::UnknownRate(other)),
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.per_point())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_total_crosses_threshold() {
        assert_eq!(Rate::for_total(24, Rate::Standard), Rate::Standard);
        assert_eq!(Rate::for_total(25, Rate::Standard), Rate::Bonus);
        // A bonus base stays bonus even under the threshold
        assert_eq!(Rate::for_total(10, Rate::Bonus), Rate::Bonus);
    }

    #[test]
    fn test_rate_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Rate::Bonus).unwrap(), "40");
        let r: Rate = serde_json::from_str("20").unwrap();
        assert_eq!(r, Rate::Standard);
        assert!(serde_json::from_str::<Rate>("30").is_err());
    }
}

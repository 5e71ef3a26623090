//! Rounding of fractional cent amounts (percentage splits only).

use serde::{Deserialize, Serialize};

use splitledger_core::DomainError;

use crate::model::Cents;

/// Tie-breaking rule used when a percentage share lands exactly on half a cent.
///
/// Whatever the mode, the allocator afterwards pushes the residue onto the
/// first included member, so the mode only changes *which* member absorbs a
/// stray cent, never the expense total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// 2.5 -> 3, -2.5 -> -3.
    #[default]
    HalfAwayFromZero,
    /// Banker's rounding: 2.5 -> 2, 3.5 -> 4.
    HalfEven,
}

impl RoundingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingMode::HalfAwayFromZero => "half_away_from_zero",
            RoundingMode::HalfEven => "half_even",
        }
    }

    /// Round a fractional cent value to whole cents.
    ///
    /// Non-finite input rounds to 0; out-of-range values saturate.
    pub fn round_cents(self, value: f64) -> Cents {
        let rounded = match self {
            RoundingMode::HalfAwayFromZero => value.round(),
            RoundingMode::HalfEven => value.round_ties_even(),
        };
        rounded as Cents
    }
}

impl core::fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for RoundingMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "half_away_from_zero" | "half-away-from-zero" => Ok(RoundingMode::HalfAwayFromZero),
            "half_even" | "half-even" | "bankers" => Ok(RoundingMode::HalfEven),
            other => Err(DomainError::validation(format!(
                "unknown rounding mode: {other}"
            ))),
        }
    }
}

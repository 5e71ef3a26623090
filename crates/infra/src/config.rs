//! Configuration loading from the process environment.

use core::str::FromStr;

use thiserror::Error;

use splitledger_ledger::{RoundingMode, ValidationLimits, Validator};

pub const ROUNDING_VAR: &str = "SPLITLEDGER_ROUNDING";
pub const MAX_AMOUNT_VAR: &str = "SPLITLEDGER_MAX_AMOUNT_CENTS";
pub const MIN_MEMBERS_VAR: &str = "SPLITLEDGER_MIN_MEMBERS";
pub const MAX_MEMBERS_VAR: &str = "SPLITLEDGER_MAX_MEMBERS";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("SPLITLEDGER_MIN_MEMBERS ({min}) exceeds SPLITLEDGER_MAX_MEMBERS ({max})")]
    MemberRange { min: usize, max: usize },
}

/// Runtime settings of the ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerConfig {
    /// Tie-break rule for percentage shares.
    pub rounding: RoundingMode,
    pub limits: ValidationLimits,
}

impl LedgerConfig {
    /// Read the configuration from environment variables; unset variables keep
    /// their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LedgerConfig::from_env`], with an explicit variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(rounding) = parse_var(&lookup, ROUNDING_VAR)? {
            config.rounding = rounding;
        }
        if let Some(max_amount) = parse_var::<i64>(&lookup, MAX_AMOUNT_VAR)? {
            if max_amount <= 0 {
                return Err(ConfigError::Invalid {
                    key: MAX_AMOUNT_VAR,
                    value: max_amount.to_string(),
                });
            }
            config.limits.max_amount = max_amount;
        }
        if let Some(min) = parse_var(&lookup, MIN_MEMBERS_VAR)? {
            config.limits.min_members = min;
        }
        if let Some(max) = parse_var(&lookup, MAX_MEMBERS_VAR)? {
            config.limits.max_members = max;
        }

        let (min, max) = (config.limits.min_members, config.limits.max_members);
        if min > max {
            return Err(ConfigError::MemberRange { min, max });
        }

        Ok(config)
    }

    pub fn validator(&self) -> Validator {
        Validator::new(self.limits.clone())
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}

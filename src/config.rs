use crate::domain::billing::MinimumDueRule;
use crate::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub const DEFAULT_MAX_MONTHS: u32 = 1200;
pub const DEFAULT_MONEY_SCALE: u32 = 2;

/// Tunables for the amortization engine.
///
/// Loaded from a JSON file; every field is optional and falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlannerConfig {
    /// Upper bound on schedule length (100 years).
    pub max_months: u32,
    /// Decimal places interest is rounded to each month.
    pub money_scale: u32,
    /// Derives a minimum payment for debts whose record omits one.
    pub minimum_due: Option<MinimumDueRule>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_months: DEFAULT_MAX_MONTHS,
            money_scale: DEFAULT_MONEY_SCALE,
            minimum_due: None,
        }
    }
}

impl PlannerConfig {
    pub fn from_reader<R: Read>(source: R) -> Result<Self> {
        let config: Self = serde_json::from_reader(BufReader::new(source))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_months == 0 {
            return Err(PlannerError::invalid_argument(
                "max_months must be at least 1",
            ));
        }
        // Decimal supports at most 28 fractional digits.
        if self.money_scale > 10 {
            return Err(PlannerError::invalid_argument(
                "money_scale must be between 0 and 10",
            ));
        }
        if let Some(rule) = &self.minimum_due {
            rule.validate()?;
        }
        Ok(())
    }
}

use super::money::{InterestRate, Money};
use crate::error::{PlannerError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Credit-card style minimum due for a billing cycle.
///
/// The due amount is a percentage of the statement balance, optionally plus
/// the month's interest, never below `floor` and never above what is owed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimumDueRule {
    pub percent_of_balance: Decimal,
    #[serde(default)]
    pub floor: Money,
    #[serde(default)]
    pub include_interest: bool,
}

impl MinimumDueRule {
    pub fn new(percent_of_balance: Decimal, floor: Money) -> Self {
        Self {
            percent_of_balance,
            floor,
            include_interest: false,
        }
    }

    pub fn with_interest(mut self) -> Self {
        self.include_interest = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.percent_of_balance <= Decimal::ZERO || self.percent_of_balance > Decimal::ONE_HUNDRED
        {
            return Err(PlannerError::invalid_argument(
                "minimum due percentage must be within (0, 100]",
            ));
        }
        if self.floor.is_negative() {
            return Err(PlannerError::invalid_argument(
                "minimum due floor must not be negative",
            ));
        }
        if self.floor.exceeds_max() {
            return Err(PlannerError::invalid_argument(format!(
                "minimum due floor must not exceed {}",
                Money::MAX
            )));
        }
        Ok(())
    }

    pub fn minimum_due(&self, balance: Money, rate: InterestRate, scale: u32) -> Money {
        if balance.is_zero() {
            return Money::ZERO;
        }
        let interest = if self.include_interest {
            rate.monthly_interest(balance, scale)
        } else {
            Money::ZERO
        };
        let owed = balance + interest;
        let percent = Money(balance.value() * self.percent_of_balance / Decimal::ONE_HUNDRED);
        let due = (percent + interest).round(scale).max(self.floor);
        due.min(owed)
    }
}

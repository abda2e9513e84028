use super::billing::MinimumDueRule;
use super::money::{InterestRate, Money};
use crate::error::{PlannerError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A liability as supplied by the account data store.
///
/// Field names follow snake_case; the camelCase spellings used by the
/// application front end are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Principal still outstanding.
    #[serde(alias = "remainingAmount")]
    pub remaining_amount: Money,
    /// Annual percentage rate.
    #[serde(alias = "interestRate")]
    pub interest_rate: InterestRate,
    /// Baseline payment owed each month.
    #[serde(
        default,
        alias = "minimumPayment",
        alias = "monthlyPayment",
        alias = "monthly_payment",
        skip_serializing_if = "Option::is_none"
    )]
    pub minimum_payment: Option<Money>,
    /// Original principal.
    #[serde(
        default,
        alias = "totalAmount",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_amount: Option<Money>,
    #[serde(
        default,
        alias = "dueDate",
        alias = "nextPaymentDate",
        alias = "next_payment_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<NaiveDate>,
}

impl Debt {
    pub fn new(
        id: impl Into<String>,
        remaining_amount: Decimal,
        interest_rate: Decimal,
        minimum_payment: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            remaining_amount: Money::new(remaining_amount),
            interest_rate: InterestRate::new(interest_rate),
            minimum_payment: Some(Money::new(minimum_payment)),
            total_amount: None,
            due_date: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_total_amount(mut self, total: Decimal) -> Self {
        self.total_amount = Some(Money::new(total));
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn is_paid_off(&self) -> bool {
        self.remaining_amount.is_zero()
    }

    /// Checks the numeric sanity of the record.
    ///
    /// Amounts must lie within `0..=Money::MAX` and the rate within
    /// `0..=InterestRate::MAX`.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(PlannerError::invalid_argument("debt id must not be empty"));
        }
        self.check_amount(Some(self.remaining_amount), "remaining amount")?;
        self.check_amount(self.minimum_payment, "minimum payment")?;
        self.check_amount(self.total_amount, "total amount")?;

        let rate = self.interest_rate;
        if rate.annual_percent() < Decimal::ZERO {
            return Err(PlannerError::invalid(
                &self.id,
                "interest rate must not be negative",
            ));
        }
        if rate > InterestRate::MAX {
            return Err(PlannerError::invalid(
                &self.id,
                format!("interest rate must not exceed {}", InterestRate::MAX),
            ));
        }
        Ok(())
    }

    fn check_amount(&self, amount: Option<Money>, what: &str) -> Result<()> {
        match amount {
            Some(a) if a.is_negative() => Err(PlannerError::invalid(
                &self.id,
                format!("{what} must not be negative"),
            )),
            Some(a) if a.exceeds_max() => Err(PlannerError::invalid(
                &self.id,
                format!("{what} must not exceed {}", Money::MAX),
            )),
            _ => Ok(()),
        }
    }

    /// The payment the debt requires each month.
    ///
    /// A record without a minimum falls back to `rule` when one is configured.
    pub fn required_payment(&self, rule: Option<&MinimumDueRule>, scale: u32) -> Result<Money> {
        match (self.minimum_payment, rule) {
            (Some(minimum), _) => Ok(minimum),
            (None, Some(rule)) => {
                Ok(rule.minimum_due(self.remaining_amount, self.interest_rate, scale))
            }
            (None, None) => Err(PlannerError::invalid(
                &self.id,
                "minimum payment is required",
            )),
        }
    }

    /// Share of the original principal already repaid, as a percentage.
    pub fn progress_percent(&self) -> Option<Decimal> {
        let total = self.total_amount?;
        if total.is_zero() {
            return None;
        }
        let paid = total.saturating_sub(self.remaining_amount);
        Some((paid.value() * Decimal::ONE_HUNDRED / total.value()).round_dp(2))
    }
}

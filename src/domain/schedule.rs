use super::money::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One month's payment on one debt, split into interest and principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAllocation {
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub remaining_balance: Money,
}

impl PaymentAllocation {
    /// Applies `offered` against `balance` after `interest` has accrued.
    ///
    /// The payment is capped at `balance + interest` so the final month pays
    /// exactly what is left. `interest + principal == payment` always holds and
    /// `principal` never exceeds `balance`.
    pub fn split(balance: Money, interest: Money, offered: Money) -> Self {
        let payment = offered.min(balance + interest);
        let principal = payment - interest;
        Self {
            payment,
            interest,
            principal,
            remaining_balance: balance - principal,
        }
    }

    pub fn clears_balance(&self) -> bool {
        self.remaining_balance.is_zero()
    }
}

/// A single row of an amortization schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// 1-based month index.
    pub month: u32,
    pub date: NaiveDate,
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    pub remaining_balance: Money,
}

impl AmortizationEntry {
    pub fn new(month: u32, date: NaiveDate, allocation: PaymentAllocation) -> Self {
        Self {
            month,
            date,
            payment: allocation.payment,
            principal: allocation.principal,
            interest: allocation.interest,
            remaining_balance: allocation.remaining_balance,
        }
    }
}

/// The month-by-month schedule of one debt until payoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPlan {
    pub debt_id: String,
    pub entries: Vec<AmortizationEntry>,
    pub months: u32,
    pub total_interest: Money,
    pub total_paid: Money,
    pub payoff_date: NaiveDate,
}

impl PaymentPlan {
    pub fn new(debt_id: impl Into<String>, entries: Vec<AmortizationEntry>, start: NaiveDate) -> Self {
        let total_interest: Money = entries.iter().map(|e| e.interest).sum();
        let total_paid: Money = entries.iter().map(|e| e.payment).sum();
        let payoff_date = entries.last().map_or(start, |e| e.date);
        Self {
            debt_id: debt_id.into(),
            months: entries.len() as u32,
            entries,
            total_interest,
            total_paid,
            payoff_date,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Which debt receives money beyond the minimums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoffPolicy {
    /// Highest interest rate first.
    Avalanche,
    /// Smallest remaining balance first.
    Snowball,
}

impl fmt::Display for PayoffPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoffPolicy::Avalanche => f.write_str("avalanche"),
            PayoffPolicy::Snowball => f.write_str("snowball"),
        }
    }
}

impl FromStr for PayoffPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avalanche" => Ok(PayoffPolicy::Avalanche),
            "snowball" => Ok(PayoffPolicy::Snowball),
            other => Err(format!("unknown payoff policy: {other}")),
        }
    }
}

/// Aggregate result of paying down several debts from one monthly budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentStrategy {
    pub policy: PayoffPolicy,
    /// Month index at which the last debt reaches zero.
    pub total_months: u32,
    pub total_interest_paid: Money,
    pub total_paid: Money,
    pub payoff_date: NaiveDate,
    /// Debt ids in the order their balances reach zero.
    pub payoff_order: Vec<String>,
    /// Per-debt schedules in priority order.
    pub schedules: Vec<PaymentPlan>,
}

impl RepaymentStrategy {
    pub fn schedule(&self, debt_id: &str) -> Option<&PaymentPlan> {
        self.schedules.iter().find(|s| s.debt_id == debt_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyComparison {
    pub avalanche: RepaymentStrategy,
    pub snowball: RepaymentStrategy,
    /// Interest paid when every debt only ever receives its own minimum.
    pub minimum_only_interest: Money,
    pub avalanche_savings: Money,
    pub snowball_savings: Money,
}

impl StrategyComparison {
    /// The policy paying the least interest; avalanche wins ties.
    pub fn cheapest(&self) -> &RepaymentStrategy {
        if self.snowball.total_interest_paid < self.avalanche.total_interest_paid {
            &self.snowball
        } else {
            &self.avalanche
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_split_regular_month() {
        let alloc = PaymentAllocation::split(
            Money::new(dec!(1200)),
            Money::new(dec!(12)),
            Money::new(dec!(103)),
        );
        assert_eq!(alloc.payment, Money::new(dec!(103)));
        assert_eq!(alloc.principal, Money::new(dec!(91)));
        assert_eq!(alloc.remaining_balance, Money::new(dec!(1109)));
        assert!(!alloc.clears_balance());
    }

    #[test]
    fn test_split_caps_final_payment() {
        let alloc = PaymentAllocation::split(
            Money::new(dec!(50)),
            Money::new(dec!(0.50)),
            Money::new(dec!(103)),
        );
        assert_eq!(alloc.payment, Money::new(dec!(50.50)));
        assert_eq!(alloc.principal, Money::new(dec!(50)));
        assert!(alloc.clears_balance());
        assert_eq!(alloc.interest + alloc.principal, alloc.payment);
    }

    #[test]
    fn test_plan_totals() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let alloc = PaymentAllocation::split(
            Money::new(dec!(100)),
            Money::new(dec!(1)),
            Money::new(dec!(200)),
        );
        let plan = PaymentPlan::new("a", vec![AmortizationEntry::new(1, date, alloc)], start);
        assert_eq!(plan.months, 1);
        assert_eq!(plan.total_interest, Money::new(dec!(1)));
        assert_eq!(plan.total_paid, Money::new(dec!(101)));
        assert_eq!(plan.payoff_date, date);

        let empty = PaymentPlan::new("b", Vec::new(), start);
        assert!(empty.is_empty());
        assert_eq!(empty.payoff_date, start);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("Avalanche".parse::<PayoffPolicy>(), Ok(PayoffPolicy::Avalanche));
        assert_eq!(" snowball ".parse::<PayoffPolicy>(), Ok(PayoffPolicy::Snowball));
        assert!("random".parse::<PayoffPolicy>().is_err());
        assert_eq!(
            serde_json::to_string(&PayoffPolicy::Snowball).unwrap(),
            "\"snowball\""
        );
    }
}

use crate::config::PlannerConfig;
use crate::domain::debt::Debt;
use crate::domain::money::Money;
use crate::domain::schedule::{
    AmortizationEntry, PaymentAllocation, PaymentPlan, PayoffPolicy, RepaymentStrategy,
    StrategyComparison,
};
use crate::error::{PlannerError, Result};
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::debug;

/// Computes amortization schedules and multi-debt repayment strategies.
///
/// The engine holds only its configuration. Every computation is a pure
/// function of its arguments, so one engine can be shared across threads and
/// calls with identical inputs return identical schedules.
#[derive(Debug, Clone, Default)]
pub struct AmortizationEngine {
    config: PlannerConfig,
}

/// Running state of one debt while a strategy is simulated.
struct DebtTracker<'a> {
    debt: &'a Debt,
    minimum: Money,
    balance: Money,
    interest: Money,
    payment: Money,
    entries: Vec<AmortizationEntry>,
}

impl<'a> DebtTracker<'a> {
    fn new(debt: &'a Debt, minimum: Money) -> Self {
        Self {
            debt,
            minimum,
            balance: debt.remaining_amount,
            interest: Money::ZERO,
            payment: Money::ZERO,
            entries: Vec::new(),
        }
    }

    fn is_open(&self) -> bool {
        !self.balance.is_zero()
    }

    /// What it would take to clear the debt this month, beyond what is already assigned.
    fn room(&self) -> Money {
        (self.balance + self.interest).saturating_sub(self.payment)
    }
}

impl AmortizationEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Builds the month-by-month schedule for a single debt.
    ///
    /// Each month the debt receives its required payment plus
    /// `extra_payment_per_month`, capped at what is owed. Fails with
    /// [`PlannerError::NonConvergentPayment`] when the payment does not exceed
    /// the interest accrued that month, and with
    /// [`PlannerError::HorizonExceeded`] when the schedule would run past the
    /// configured number of months. A debt that is already paid off yields an
    /// empty plan ending on `start`.
    pub fn compute_debt_payment_plan(
        &self,
        debt: &Debt,
        extra_payment_per_month: Decimal,
        start: NaiveDate,
    ) -> Result<PaymentPlan> {
        debt.validate()?;
        let extra = non_negative(extra_payment_per_month, "extra payment per month")?;
        let scale = self.config.money_scale;
        let offered = self
            .required_payment(debt)?
            .checked_add(extra)
            .ok_or_else(|| PlannerError::invalid(&debt.id, "monthly payment is out of range"))?;

        let mut balance = debt.remaining_amount;
        let mut entries = Vec::new();
        while !balance.is_zero() {
            let month = entries.len() as u32 + 1;
            if month > self.config.max_months {
                return Err(PlannerError::HorizonExceeded {
                    debt: debt.id.clone(),
                    months: self.config.max_months,
                });
            }
            let interest = debt.interest_rate.monthly_interest(balance, scale);
            if offered <= interest {
                return Err(non_convergent(debt, offered, interest));
            }
            let allocation = PaymentAllocation::split(balance, interest, offered);
            balance = allocation.remaining_balance;
            entries.push(AmortizationEntry::new(
                month,
                payment_date(start, month)?,
                allocation,
            ));
        }

        let plan = PaymentPlan::new(&debt.id, entries, start);
        debug!(
            debt = %debt.id,
            months = plan.months,
            total_interest = %plan.total_interest,
            "computed payment plan"
        );
        Ok(plan)
    }

    /// Pays down `debts` from a fixed monthly budget under `policy`.
    ///
    /// Every open debt receives its minimum first. The budget left over goes to
    /// the highest-ranked open debt; once a debt is cleared, the money it used
    /// to take flows to the next one in rank. When the budget only covers the
    /// minimums nothing is reallocated and the result does not depend on the
    /// policy. Debts with a zero balance are skipped.
    ///
    /// With a surplus, interest-only minimums (and a zero minimum on a 0%
    /// debt) are accepted since the surplus eventually reaches them.
    pub fn compute_repayment_strategy(
        &self,
        debts: &[Debt],
        total_monthly_budget: Decimal,
        policy: PayoffPolicy,
        start: NaiveDate,
    ) -> Result<RepaymentStrategy> {
        let budget = non_negative(total_monthly_budget, "total monthly budget")?;
        let scale = self.config.money_scale;

        let mut seen = HashSet::new();
        let mut trackers = Vec::with_capacity(debts.len());
        for debt in debts {
            debt.validate()?;
            if !seen.insert(debt.id.as_str()) {
                return Err(PlannerError::invalid(&debt.id, "duplicate debt id"));
            }
            if debt.is_paid_off() {
                debug!(debt = %debt.id, "skipping paid off debt");
                continue;
            }
            trackers.push(DebtTracker::new(debt, self.required_payment(debt)?));
        }

        let required = trackers
            .iter()
            .try_fold(Money::ZERO, |sum, t| sum.checked_add(t.minimum))
            .ok_or_else(|| {
                PlannerError::invalid_argument("sum of minimum payments is out of range")
            })?;
        if budget < required {
            return Err(PlannerError::InsufficientBudget {
                budget: budget.value().normalize(),
                required: required.value().normalize(),
            });
        }

        // With a surplus a minimum only has to keep the balance from growing;
        // without one each debt must amortize on its own minimum.
        let rollover = budget > required;
        for tracker in &trackers {
            let interest = tracker
                .debt
                .interest_rate
                .monthly_interest(tracker.balance, scale);
            let stalls = if rollover {
                tracker.minimum < interest
            } else {
                tracker.minimum <= interest
            };
            if stalls {
                return Err(non_convergent(tracker.debt, tracker.minimum, interest));
            }
        }

        rank(&mut trackers, policy);

        let mut month = 0;
        let mut payoff_order = Vec::with_capacity(trackers.len());
        while trackers.iter().any(DebtTracker::is_open) {
            month += 1;
            if month > self.config.max_months {
                let stuck = trackers.iter().find(|t| t.is_open()).map(|t| t.debt.id.clone());
                return Err(PlannerError::HorizonExceeded {
                    debt: stuck.unwrap_or_default(),
                    months: self.config.max_months,
                });
            }
            let date = payment_date(start, month)?;

            let mut pool = budget;
            for tracker in trackers.iter_mut().filter(|t| t.is_open()) {
                tracker.interest = tracker
                    .debt
                    .interest_rate
                    .monthly_interest(tracker.balance, scale);
                tracker.payment = tracker.minimum.min(tracker.balance + tracker.interest);
                pool -= tracker.payment;
            }

            if rollover {
                for tracker in trackers.iter_mut().filter(|t| t.is_open()) {
                    if pool.is_zero() {
                        break;
                    }
                    let extra = tracker.room().min(pool);
                    tracker.payment += extra;
                    pool -= extra;
                }
            }

            for tracker in trackers.iter_mut().filter(|t| t.is_open()) {
                let allocation =
                    PaymentAllocation::split(tracker.balance, tracker.interest, tracker.payment);
                tracker.balance = allocation.remaining_balance;
                tracker
                    .entries
                    .push(AmortizationEntry::new(month, date, allocation));
                if allocation.clears_balance() {
                    debug!(debt = %tracker.debt.id, month, %policy, "debt paid off");
                    payoff_order.push(tracker.debt.id.clone());
                }
            }
        }

        let schedules: Vec<PaymentPlan> = trackers
            .into_iter()
            .map(|t| PaymentPlan::new(&t.debt.id, t.entries, start))
            .collect();
        let total_interest_paid: Money = schedules.iter().map(|s| s.total_interest).sum();
        let total_paid: Money = schedules.iter().map(|s| s.total_paid).sum();

        debug!(%policy, total_months = month, %total_interest_paid, "computed repayment strategy");
        Ok(RepaymentStrategy {
            policy,
            total_months: month,
            total_interest_paid,
            total_paid,
            payoff_date: payment_date(start, month)?,
            payoff_order,
            schedules,
        })
    }

    /// Runs both policies and measures each against paying only the minimums.
    pub fn compare_strategies(
        &self,
        debts: &[Debt],
        total_monthly_budget: Decimal,
        start: NaiveDate,
    ) -> Result<StrategyComparison> {
        let avalanche = self.compute_repayment_strategy(
            debts,
            total_monthly_budget,
            PayoffPolicy::Avalanche,
            start,
        )?;
        let snowball = self.compute_repayment_strategy(
            debts,
            total_monthly_budget,
            PayoffPolicy::Snowball,
            start,
        )?;

        let mut minimum_only_interest = Money::ZERO;
        for debt in debts.iter().filter(|d| !d.is_paid_off()) {
            minimum_only_interest += self
                .compute_debt_payment_plan(debt, Decimal::ZERO, start)?
                .total_interest;
        }

        Ok(StrategyComparison {
            avalanche_savings: minimum_only_interest.saturating_sub(avalanche.total_interest_paid),
            snowball_savings: minimum_only_interest.saturating_sub(snowball.total_interest_paid),
            avalanche,
            snowball,
            minimum_only_interest,
        })
    }

    fn required_payment(&self, debt: &Debt) -> Result<Money> {
        debt.required_payment(self.config.minimum_due.as_ref(), self.config.money_scale)
    }
}

/// Orders trackers by policy; ties fall back to ascending debt id.
fn rank(trackers: &mut [DebtTracker<'_>], policy: PayoffPolicy) {
    trackers.sort_by(|a, b| {
        let by_policy = match policy {
            PayoffPolicy::Avalanche => b.debt.interest_rate.cmp(&a.debt.interest_rate),
            PayoffPolicy::Snowball => a.balance.cmp(&b.balance),
        };
        by_policy.then_with(|| a.debt.id.cmp(&b.debt.id))
    });
}

fn non_negative(value: Decimal, what: &str) -> Result<Money> {
    let money = Money::new(value);
    if money.is_negative() {
        Err(PlannerError::invalid_argument(format!(
            "{what} must not be negative"
        )))
    } else if money.exceeds_max() {
        Err(PlannerError::invalid_argument(format!(
            "{what} must not exceed {}",
            Money::MAX
        )))
    } else {
        Ok(money)
    }
}

fn non_convergent(debt: &Debt, payment: Money, interest: Money) -> PlannerError {
    PlannerError::NonConvergentPayment {
        debt: debt.id.clone(),
        payment: payment.value().normalize(),
        interest: interest.value().normalize(),
    }
}

/// Date of the `month`-th payment counted from `start`.
fn payment_date(start: NaiveDate, month: u32) -> Result<NaiveDate> {
    start
        .checked_add_months(Months::new(month))
        .ok_or_else(|| PlannerError::invalid_argument("payment date out of range"))
}

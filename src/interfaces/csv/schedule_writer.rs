use crate::domain::money::Money;
use crate::domain::schedule::{PaymentPlan, RepaymentStrategy, StrategyComparison};
use crate::error::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct ScheduleRow<'a> {
    debt_id: &'a str,
    month: u32,
    date: NaiveDate,
    payment: Money,
    principal: Money,
    interest: Money,
    balance: Money,
}

#[derive(Serialize)]
struct SummaryRow<'a> {
    policy: &'a str,
    total_months: u32,
    total_interest: Money,
    total_paid: Money,
    payoff_date: NaiveDate,
    payoff_order: String,
}

/// Writes schedules and strategy summaries as CSV.
pub struct ScheduleWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ScheduleWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// One row per month of `plan`.
    pub fn write_plan(&mut self, plan: &PaymentPlan) -> Result<()> {
        for entry in &plan.entries {
            self.writer.serialize(ScheduleRow {
                debt_id: &plan.debt_id,
                month: entry.month,
                date: entry.date,
                payment: entry.payment,
                principal: entry.principal,
                interest: entry.interest,
                balance: entry.remaining_balance,
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Rows of every debt in `strategy`, grouped by debt in priority order.
    pub fn write_strategy(&mut self, strategy: &RepaymentStrategy) -> Result<()> {
        for plan in &strategy.schedules {
            self.write_plan(plan)?;
        }
        Ok(())
    }

    /// One summary row per policy.
    pub fn write_comparison(&mut self, comparison: &StrategyComparison) -> Result<()> {
        for strategy in [&comparison.avalanche, &comparison.snowball] {
            let policy = strategy.policy.to_string();
            self.writer.serialize(SummaryRow {
                policy: &policy,
                total_months: strategy.total_months,
                total_interest: strategy.total_interest_paid,
                total_paid: strategy.total_paid,
                payoff_date: strategy.payoff_date,
                payoff_order: strategy.payoff_order.join(" "),
            })?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()).into())
    }
}

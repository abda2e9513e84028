//! Application layer containing the repayment calculations.
//!
//! This module defines the `AmortizationEngine`, the entry point for building
//! single-debt payment plans and multi-debt repayment strategies. It performs
//! no I/O; callers load debts through a `DebtStore` and hand over a snapshot.

pub mod engine;

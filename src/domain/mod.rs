//! Domain model: debts, money values and the schedules computed from them.

pub mod billing;
pub mod debt;
pub mod money;
pub mod ports;
pub mod schedule;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Invalid input{}: {reason}", debt_suffix(.debt))]
    InvalidInput {
        debt: Option<String>,
        reason: String,
    },
    /// The payment never outpaces interest accrual, so the balance never shrinks.
    #[error(
        "Debt {debt}: monthly payment {payment} does not exceed monthly interest {interest}"
    )]
    NonConvergentPayment {
        debt: String,
        payment: Decimal,
        interest: Decimal,
    },
    #[error("Debt {debt}: not paid off within {months} months")]
    HorizonExceeded { debt: String, months: u32 },
    #[error("Monthly budget {budget} is below the sum of minimum payments {required}")]
    InsufficientBudget { budget: Decimal, required: Decimal },
}

impl PlannerError {
    pub fn invalid(debt: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            debt: Some(debt.into()),
            reason: reason.into(),
        }
    }

    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            debt: None,
            reason: reason.into(),
        }
    }

    /// The debt that triggered the error, when there is one.
    pub fn debt(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { debt, .. } => debt.as_deref(),
            Self::NonConvergentPayment { debt, .. } | Self::HorizonExceeded { debt, .. } => {
                Some(debt)
            }
            _ => None,
        }
    }
}

fn debt_suffix(debt: &Option<String>) -> String {
    match debt {
        Some(id) => format!(" for debt {id}"),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;

use super::debt::Debt;
use crate::error::Result;
use async_trait::async_trait;

/// Source of liability records handed to the engine.
#[async_trait]
pub trait DebtStore: Send + Sync {
    async fn store(&self, debt: Debt) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<Debt>>;
    /// Every stored debt, ordered by id.
    async fn all(&self) -> Result<Vec<Debt>>;
}

pub type DebtStoreBox = Box<dyn DebtStore>;
pub type DebtStoreFactory = Box<dyn Fn() -> DebtStoreBox + Send + Sync>;

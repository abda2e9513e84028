use crate::domain::debt::Debt;
use crate::domain::ports::DebtStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for debt records.
///
/// Uses `Arc<RwLock<HashMap<String, Debt>>>` so clones share the same records.
#[derive(Default, Clone)]
pub struct InMemoryDebtStore {
    debts: Arc<RwLock<HashMap<String, Debt>>>,
}

impl InMemoryDebtStore {
    /// Creates a new, empty in-memory debt store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DebtStore for InMemoryDebtStore {
    async fn store(&self, debt: Debt) -> Result<()> {
        let mut debts = self.debts.write().await;
        debts.insert(debt.id.clone(), debt);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Debt>> {
        let debts = self.debts.read().await;
        Ok(debts.get(id).cloned())
    }

    async fn all(&self) -> Result<Vec<Debt>> {
        let debts = self.debts.read().await;
        let mut all: Vec<Debt> = debts.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }
}

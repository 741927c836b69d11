//! In-memory implementation of LoginAttemptRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::login_attempt::{AttemptTotals, LoginAttemptRecord};
use crate::errors::DomainError;

use super::trait_::LoginAttemptRepository;

/// In-memory append-only attempt log
pub struct InMemoryLoginAttemptRepository {
    rows: Arc<RwLock<Vec<LoginAttemptRecord>>>,
}

impl InMemoryLoginAttemptRepository {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl Default for InMemoryLoginAttemptRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoginAttemptRepository for InMemoryLoginAttemptRepository {
    async fn append(&self, record: LoginAttemptRecord) -> Result<(), DomainError> {
        self.rows.write().await.push(record);
        Ok(())
    }

    async fn sum_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<AttemptTotals, DomainError> {
        let rows = self.rows.read().await;
        let mut totals = AttemptTotals::default();
        for row in rows.iter() {
            if row.timestamp >= start && row.timestamp < end {
                totals.add(row);
            }
        }
        Ok(totals)
    }
}

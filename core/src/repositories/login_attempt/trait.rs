//! Login attempt repository trait for the append-only attempt log.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::login_attempt::{AttemptTotals, LoginAttemptRecord};
use crate::errors::DomainError;

/// Append-only storage for login attempt rows
#[async_trait]
pub trait LoginAttemptRepository: Send + Sync {
    /// Append one row. Rows are never updated afterwards.
    async fn append(&self, record: LoginAttemptRecord) -> Result<(), DomainError>;

    /// Column-wise sums over rows with `start <= timestamp < end`
    async fn sum_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<AttemptTotals, DomainError>;
}

//! Append-only login attempt records and their aggregation totals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded login outcome. Rows are never updated in place; every
/// observation appends a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginAttemptRecord {
    /// Unique identifier for the row
    pub id: Uuid,

    /// The user the attempt resolved to, when known
    pub user_id: Option<Uuid>,

    /// 1 when the attempt succeeded
    pub total_logins: u32,

    /// 1 when the attempt succeeded for a staff or superuser account
    pub admin_logins: u32,

    /// 1 when the attempt failed
    pub failed_attempts: u32,

    /// When the attempt was observed
    pub timestamp: DateTime<Utc>,
}

impl LoginAttemptRecord {
    /// Row for a successful login
    pub fn success(user_id: Uuid, is_admin: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: Some(user_id),
            total_logins: 1,
            admin_logins: if is_admin { 1 } else { 0 },
            failed_attempts: 0,
            timestamp: Utc::now(),
        }
    }

    /// Row for a failed login. The user may be unknown when the
    /// identifier did not resolve.
    pub fn failure(user_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            total_logins: 0,
            admin_logins: 0,
            failed_attempts: 1,
            timestamp: Utc::now(),
        }
    }
}

/// Column-wise sums over a window of attempt rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptTotals {
    pub total_logins: u64,
    pub admin_logins: u64,
    pub failed_attempts: u64,
}

impl AttemptTotals {
    /// Folds one row into the running totals
    pub fn add(&mut self, record: &LoginAttemptRecord) {
        self.total_logins += u64::from(record.total_logins);
        self.admin_logins += u64::from(record.admin_logins);
        self.failed_attempts += u64::from(record.failed_attempts);
    }
}

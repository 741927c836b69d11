//! OTP store trait defining the interface for challenge persistence.
//!
//! The store keys challenges by `(subject, reason)`: at most one current
//! record exists per pair, and saving replaces whatever was there.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::otp::{OtpReason, OtpRecord};
use crate::errors::DomainError;

/// Persistence for OTP challenges
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// The current record for the pair, if any
    async fn get(
        &self,
        subject: Uuid,
        reason: OtpReason,
    ) -> Result<Option<OtpRecord>, DomainError>;

    /// The current record when it is still active, otherwise a freshly
    /// created active record replacing whatever was there. Creation and
    /// the existence check happen under one lock, so two concurrent
    /// callers cannot both create a record for the same pair.
    async fn get_or_create(&self, subject: Uuid, reason: OtpReason)
        -> Result<OtpRecord, DomainError>;

    /// Insert or replace the current record for the record's pair
    async fn save(&self, record: OtpRecord) -> Result<(), DomainError>;

    /// Mark the current record for the pair as expired, if one exists
    /// and is still active
    async fn expire_active(&self, subject: Uuid, reason: OtpReason) -> Result<(), DomainError>;
}

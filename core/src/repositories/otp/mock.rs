//! In-memory implementation of OtpStore for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::otp::{OtpReason, OtpRecord, OtpState};
use crate::errors::DomainError;

use super::trait_::OtpStore;

/// In-memory OTP store holding one record per `(subject, reason)` pair
pub struct InMemoryOtpStore {
    records: Arc<RwLock<HashMap<(Uuid, OtpReason), OtpRecord>>>,
    fail_reads: Arc<RwLock<bool>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fail_reads: Arc::new(RwLock::new(false)),
        }
    }

    /// Makes subsequent `get` calls fail, for exercising error paths
    pub async fn set_fail_reads(&self, fail: bool) {
        *self.fail_reads.write().await = fail;
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for InMemoryOtpStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn get(
        &self,
        subject: Uuid,
        reason: OtpReason,
    ) -> Result<Option<OtpRecord>, DomainError> {
        if *self.fail_reads.read().await {
            return Err(DomainError::Internal {
                message: "otp store unavailable".to_string(),
            });
        }
        let records = self.records.read().await;
        Ok(records.get(&(subject, reason)).cloned())
    }

    async fn get_or_create(
        &self,
        subject: Uuid,
        reason: OtpReason,
    ) -> Result<OtpRecord, DomainError> {
        let mut records = self.records.write().await;
        match records.get(&(subject, reason)) {
            Some(record) if record.state == OtpState::Active => Ok(record.clone()),
            _ => {
                let record = OtpRecord::new(subject, reason);
                records.insert((subject, reason), record.clone());
                Ok(record)
            }
        }
    }

    async fn save(&self, record: OtpRecord) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        records.insert((record.subject, record.reason), record);
        Ok(())
    }

    async fn expire_active(&self, subject: Uuid, reason: OtpReason) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(&(subject, reason)) {
            if record.state == OtpState::Active {
                record.expire();
            }
        }
        Ok(())
    }
}

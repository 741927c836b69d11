//! Unit tests for the in-memory OTP store

use uuid::Uuid;

use crate::domain::entities::otp::{OtpReason, OtpRecord, OtpState};
use crate::errors::DomainError;
use crate::repositories::otp::{InMemoryOtpStore, OtpStore};

#[tokio::test]
async fn test_save_and_get() {
    let store = InMemoryOtpStore::new();
    let subject = Uuid::new_v4();

    let record = OtpRecord::new(subject, OtpReason::Login);
    store.save(record.clone()).await.unwrap();

    let loaded = store.get(subject, OtpReason::Login).await.unwrap().unwrap();
    assert_eq!(loaded, record);

    let other_reason = store.get(subject, OtpReason::EmailActivation).await.unwrap();
    assert!(other_reason.is_none());
}

#[tokio::test]
async fn test_save_replaces_current_record() {
    let store = InMemoryOtpStore::new();
    let subject = Uuid::new_v4();

    let first = OtpRecord::new(subject, OtpReason::Login);
    let second = OtpRecord::new(subject, OtpReason::Login);
    store.save(first).await.unwrap();
    store.save(second.clone()).await.unwrap();

    assert_eq!(store.len().await, 1);
    let loaded = store.get(subject, OtpReason::Login).await.unwrap().unwrap();
    assert_eq!(loaded.id, second.id);
}

#[tokio::test]
async fn test_get_or_create_returns_live_record() {
    let store = InMemoryOtpStore::new();
    let subject = Uuid::new_v4();

    let first = store.get_or_create(subject, OtpReason::Login).await.unwrap();
    let second = store.get_or_create(subject, OtpReason::Login).await.unwrap();
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn test_get_or_create_replaces_terminal_record() {
    let store = InMemoryOtpStore::new();
    let subject = Uuid::new_v4();

    let first = store.get_or_create(subject, OtpReason::Login).await.unwrap();
    store.expire_active(subject, OtpReason::Login).await.unwrap();

    let replacement = store.get_or_create(subject, OtpReason::Login).await.unwrap();
    assert_ne!(replacement.id, first.id);
    assert_eq!(replacement.state, OtpState::Active);
    assert_eq!(replacement.failed_attempts, 0);
}

#[tokio::test]
async fn test_expire_active() {
    let store = InMemoryOtpStore::new();
    let subject = Uuid::new_v4();

    store
        .save(OtpRecord::new(subject, OtpReason::ForgetPassword))
        .await
        .unwrap();
    store
        .expire_active(subject, OtpReason::ForgetPassword)
        .await
        .unwrap();

    let loaded = store
        .get(subject, OtpReason::ForgetPassword)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.state, OtpState::Expired);

    // expiring a missing pair is a no-op
    store
        .expire_active(Uuid::new_v4(), OtpReason::Login)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_expire_active_leaves_consumed_records() {
    let store = InMemoryOtpStore::new();
    let subject = Uuid::new_v4();

    let mut record = OtpRecord::new(subject, OtpReason::Login);
    record.consume();
    store.save(record).await.unwrap();

    store.expire_active(subject, OtpReason::Login).await.unwrap();
    let loaded = store.get(subject, OtpReason::Login).await.unwrap().unwrap();
    assert_eq!(loaded.state, OtpState::Consumed);
}

#[tokio::test]
async fn test_failing_reads() {
    let store = InMemoryOtpStore::new();
    store.set_fail_reads(true).await;

    let err = store.get(Uuid::new_v4(), OtpReason::Login).await.unwrap_err();
    assert!(matches!(err, DomainError::Internal { .. }));
}

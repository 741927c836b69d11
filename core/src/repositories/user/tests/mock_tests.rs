//! Unit tests for the in-memory user directory

use authkit_shared::config::IdentifierField;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::{DomainError, ValidationError};
use crate::repositories::user::{InMemoryUserDirectory, UserDirectory};

fn user_with_email(email: &str) -> User {
    let mut user = User::new();
    user.email = Some(email.to_string());
    user
}

#[tokio::test]
async fn test_create_and_find_by_id() {
    let directory = InMemoryUserDirectory::new();

    let user = user_with_email("a@example.com");
    let created = directory.create(user.clone()).await.unwrap();
    assert_eq!(created.id, user.id);

    let found = directory.find_by_id(user.id).await.unwrap();
    assert_eq!(found.unwrap().id, user.id);
}

#[tokio::test]
async fn test_find_by_identifier() {
    let directory = InMemoryUserDirectory::new();
    directory
        .create(user_with_email("a@example.com"))
        .await
        .unwrap();

    let found = directory
        .find_by_identifier(IdentifierField::Email, "a@example.com")
        .await
        .unwrap();
    assert!(found.is_some());

    let missing = directory
        .find_by_identifier(IdentifierField::Email, "b@example.com")
        .await
        .unwrap();
    assert!(missing.is_none());

    let wrong_field = directory
        .find_by_identifier(IdentifierField::Username, "a@example.com")
        .await
        .unwrap();
    assert!(wrong_field.is_none());
}

#[tokio::test]
async fn test_create_rejects_duplicate_identifier() {
    let directory = InMemoryUserDirectory::new();
    directory
        .create(user_with_email("a@example.com"))
        .await
        .unwrap();

    let err = directory
        .create(user_with_email("a@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::DuplicateValue { ref field }) if field == "email"
    ));
    assert_eq!(directory.len().await, 1);
}

#[tokio::test]
async fn test_save_requires_existing_user() {
    let directory = InMemoryUserDirectory::new();

    let user = user_with_email("a@example.com");
    let err = directory.save(user.clone()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    directory.create(user.clone()).await.unwrap();
    let mut updated = user;
    updated.username = Some("alice".to_string());
    let saved = directory.save(updated).await.unwrap();
    assert_eq!(saved.username.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_exists() {
    let directory = InMemoryUserDirectory::new();
    assert!(!directory
        .exists(IdentifierField::Email, "a@example.com")
        .await
        .unwrap());

    directory
        .create(user_with_email("a@example.com"))
        .await
        .unwrap();
    assert!(directory
        .exists(IdentifierField::Email, "a@example.com")
        .await
        .unwrap());

    let unknown = directory.find_by_id(Uuid::new_v4()).await.unwrap();
    assert!(unknown.is_none());
}

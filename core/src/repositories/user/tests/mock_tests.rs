//! Unit tests for mock user repository

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};

fn alice() -> User {
    User::new("alice", "alice@example.com", "Alice", "hash")
}

#[tokio::test]
async fn test_mock_repository_create_and_find() {
    let repo = MockUserRepository::new();
    let user = alice();

    let created = repo.create(user.clone()).await.unwrap();
    assert_eq!(created.id, user.id);

    let found = repo.find_by_id(user.id).await.unwrap();
    assert_eq!(found.unwrap().username, "alice");
}

#[tokio::test]
async fn test_find_by_username_or_email() {
    let repo = MockUserRepository::with_existing_user(alice());

    let by_name = repo.find_by_username_or_email(Some("alice"), None).await.unwrap();
    assert!(by_name.is_some());

    let by_email = repo
        .find_by_username_or_email(None, Some("alice@example.com"))
        .await
        .unwrap();
    assert!(by_email.is_some());

    // Either identifier is enough.
    let mixed = repo
        .find_by_username_or_email(Some("nobody"), Some("alice@example.com"))
        .await
        .unwrap();
    assert!(mixed.is_some());

    let none = repo.find_by_username_or_email(None, None).await.unwrap();
    assert!(none.is_none());
}

#[tokio::test]
async fn test_duplicate_create_conflicts() {
    let repo = MockUserRepository::with_existing_user(alice());
    let clash = User::new("someone", "alice@example.com", "Other", "hash");

    let result = repo.create(clash).await;
    assert_eq!(
        result.unwrap_err(),
        DomainError::Auth(AuthError::UserAlreadyExists)
    );
}

#[tokio::test]
async fn test_update_unknown_user() {
    let repo = MockUserRepository::new();
    let result = repo.update(alice()).await;
    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::UserNotFound))
    ));
}

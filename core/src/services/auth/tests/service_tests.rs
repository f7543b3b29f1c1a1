//! Unit tests for registration, login, logout and password change

use std::path::PathBuf;
use uuid::Uuid;

use crate::domain::value_objects::{ChangePasswordInput, LoginInput, RegisterInput};
use crate::errors::{AuthError, DomainError, ErrorKind, ValidationError};
use crate::repositories::{SessionStore, UserRepository};
use crate::services::auth::AuthServiceConfig;
use crate::services::password::PasswordHasher;

use super::mocks::*;

fn login_as(username: &str, password: &str) -> LoginInput {
    LoginInput {
        username: Some(username.to_string()),
        email: None,
        password: password.to_string(),
    }
}

fn registration(username: &str, email: &str) -> RegisterInput {
    RegisterInput {
        full_name: "Alice Liddell".to_string(),
        email: email.to_string(),
        username: username.to_string(),
        password: PASSWORD.to_string(),
        avatar_path: None,
        cover_image_path: None,
    }
}

#[tokio::test]
async fn test_login_success_stores_refresh_token() {
    let h = harness();
    let user = h.seed_user("alice", "alice@example.com").await;

    let result = h.service.login(login_as("alice", PASSWORD)).await.unwrap();

    assert_eq!(result.user.id, user.id);
    assert_eq!(result.user.username, "alice");
    assert_eq!(
        h.sessions.peek(user.id).as_deref(),
        Some(result.tokens.refresh_token.as_str())
    );

    let claims = h.issuer.verify_access_token(&result.tokens.access_token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
}

#[tokio::test]
async fn test_login_by_email() {
    let h = harness();
    h.seed_user("alice", "alice@example.com").await;

    let input = LoginInput {
        username: None,
        email: Some("alice@example.com".to_string()),
        password: PASSWORD.to_string(),
    };

    assert!(h.service.login(input).await.is_ok());
}

#[tokio::test]
async fn test_login_username_is_case_insensitive() {
    let h = harness();
    h.seed_user("alice", "alice@example.com").await;

    assert!(h.service.login(login_as("ALICE", PASSWORD)).await.is_ok());
}

#[tokio::test]
async fn test_login_wrong_password() {
    let h = harness();
    let user = h.seed_user("alice", "alice@example.com").await;

    let err = h
        .service
        .login(login_as("alice", "not the password"))
        .await
        .unwrap_err();

    assert_eq!(err, DomainError::Auth(AuthError::InvalidCredentials));
    assert_eq!(h.sessions.peek(user.id), None);
}

#[tokio::test]
async fn test_login_unknown_user() {
    let h = harness();

    let err = h.service.login(login_as("nobody", PASSWORD)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_login_requires_identifier() {
    let h = harness();

    let input = LoginInput {
        username: None,
        email: None,
        password: PASSWORD.to_string(),
    };
    let err = h.service.login(input).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_login_replaces_previous_session() {
    let h = harness();
    let user = h.seed_user("alice", "alice@example.com").await;

    let first = h.service.login(login_as("alice", PASSWORD)).await.unwrap();
    let second = h.service.login(login_as("alice", PASSWORD)).await.unwrap();

    assert_ne!(first.tokens.refresh_token, second.tokens.refresh_token);
    assert_eq!(
        h.sessions.peek(user.id).as_deref(),
        Some(second.tokens.refresh_token.as_str())
    );
}

#[tokio::test]
async fn test_login_store_failure_is_internal() {
    let h = harness();
    h.seed_user("alice", "alice@example.com").await;
    h.sessions.fail_writes();

    let err = h.service.login(login_as("alice", PASSWORD)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Internal);
}

#[tokio::test]
async fn test_logout_clears_slot_and_is_idempotent() {
    let h = harness();
    let user = h.seed_user("alice", "alice@example.com").await;
    h.service.login(login_as("alice", PASSWORD)).await.unwrap();

    h.service.logout(user.id).await.unwrap();
    assert_eq!(h.sessions.peek(user.id), None);

    h.service.logout(user.id).await.unwrap();
    h.service.logout(Uuid::new_v4()).await.unwrap();
}

#[tokio::test]
async fn test_change_password() {
    let h = harness();
    let user = h.seed_user("alice", "alice@example.com").await;
    let login = h.service.login(login_as("alice", PASSWORD)).await.unwrap();

    let input = ChangePasswordInput {
        old_password: PASSWORD.to_string(),
        new_password: "a brand new secret".to_string(),
    };
    h.service.change_password(user.id, input).await.unwrap();

    let stored = h.users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(hasher().verify("a brand new secret", &stored.password_hash));
    assert!(!hasher().verify(PASSWORD, &stored.password_hash));

    // Sessions survive by default.
    assert_eq!(
        h.sessions.peek(user.id).as_deref(),
        Some(login.tokens.refresh_token.as_str())
    );

    assert!(h.service.login(login_as("alice", PASSWORD)).await.is_err());
    assert!(h
        .service
        .login(login_as("alice", "a brand new secret"))
        .await
        .is_ok());
}

#[tokio::test]
async fn test_change_password_wrong_old_password() {
    let h = harness();
    let user = h.seed_user("alice", "alice@example.com").await;

    let input = ChangePasswordInput {
        old_password: "wrong".to_string(),
        new_password: "whatever".to_string(),
    };
    let err = h.service.change_password(user.id, input).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
    let stored = h.users.find_by_id(user.id).await.unwrap().unwrap();
    assert!(hasher().verify(PASSWORD, &stored.password_hash));
}

#[tokio::test]
async fn test_change_password_can_revoke_sessions() {
    let h = harness_with(AuthServiceConfig {
        revoke_sessions_on_password_change: true,
        ..Default::default()
    });
    let user = h.seed_user("alice", "alice@example.com").await;
    let login = h.service.login(login_as("alice", PASSWORD)).await.unwrap();

    let input = ChangePasswordInput {
        old_password: PASSWORD.to_string(),
        new_password: "rotated".to_string(),
    };
    h.service.change_password(user.id, input).await.unwrap();

    assert_eq!(h.sessions.get_refresh_token(user.id).await.unwrap(), None);
    let err = h
        .service
        .refresh_session(Some(&login.tokens.refresh_token))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SessionRevoked);
}

#[tokio::test]
async fn test_current_user() {
    let h = harness();
    let user = h.seed_user("alice", "alice@example.com").await;

    let profile = h.service.current_user(user.id).await.unwrap();
    assert_eq!(profile.email, "alice@example.com");

    let err = h.service.current_user(Uuid::new_v4()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_register_creates_user_with_empty_slot() {
    let h = harness();

    let mut input = registration("AliceW", "alice@example.com");
    input.avatar_path = Some(PathBuf::from("/tmp/uploads/avatar.png"));
    input.cover_image_path = Some(PathBuf::from("/tmp/uploads/cover.png"));

    let profile = h.service.register(input).await.unwrap();

    assert_eq!(profile.username, "alicew");
    assert_eq!(profile.avatar, "https://cdn.test/avatar.png");
    assert_eq!(profile.cover_image, "https://cdn.test/cover.png");
    assert_eq!(h.sessions.peek(profile.id), None);
    assert_eq!(h.storage.uploads.lock().unwrap().len(), 2);

    let stored = h.users.find_by_id(profile.id).await.unwrap().unwrap();
    assert_ne!(stored.password_hash, PASSWORD);
    assert!(hasher().verify(PASSWORD, &stored.password_hash));
}

#[tokio::test]
async fn test_register_duplicate_is_conflict() {
    let h = harness();
    h.seed_user("alice", "alice@example.com").await;

    let err = h
        .service
        .register(registration("alice", "other@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let err = h
        .service
        .register(registration("someone", "alice@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn test_register_email_is_case_insensitive() {
    let h = harness();

    let profile = h
        .service
        .register(registration("alice", "Alice@Example.COM"))
        .await
        .unwrap();
    assert_eq!(profile.email, "alice@example.com");

    let err = h
        .service
        .register(registration("someone", "ALICE@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let input = LoginInput {
        username: None,
        email: Some("aLiCe@example.com".to_string()),
        password: PASSWORD.to_string(),
    };
    assert!(h.service.login(input).await.is_ok());
}

#[tokio::test]
async fn test_overlong_passwords_rejected() {
    let h = harness();
    let long = format!("{}-suffix", "a".repeat(72));

    let mut input = registration("alice", "alice@example.com");
    input.password = long.clone();
    let err = h.service.register(input).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(h.users.find_by_username_or_email(Some("alice"), None).await.unwrap().is_none());

    let user = h.seed_user("bob", "bob@example.com").await;
    let err = h
        .service
        .change_password(
            user.id,
            ChangePasswordInput {
                old_password: PASSWORD.to_string(),
                new_password: long.clone(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    // A login whose password merely starts with the stored one fails
    let stored_prefix = format!("{}{}", PASSWORD, "x".repeat(72));
    let err = h.service.login(login_as("bob", &stored_prefix)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
}

#[tokio::test]
async fn test_register_blank_field() {
    let h = harness();

    let mut input = registration("alice", "alice@example.com");
    input.full_name = "   ".to_string();

    let err = h.service.register(input).await.unwrap_err();
    assert_eq!(
        err,
        DomainError::ValidationErr(ValidationError::required("full_name"))
    );
}

#[tokio::test]
async fn test_register_requires_avatar_when_configured() {
    let h = harness_with(AuthServiceConfig {
        require_avatar: true,
        ..Default::default()
    });

    let err = h
        .service
        .register(registration("alice", "alice@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_register_avatar_upload_failure() {
    let h = harness();

    let mut input = registration("alice", "alice@example.com");
    input.avatar_path = Some(PathBuf::from("/tmp/fail-avatar.png"));

    let err = h.service.register(input).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(h
        .users
        .find_by_username_or_email(Some("alice"), None)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_register_cover_upload_failure_leaves_blank_cover() {
    let h = harness();

    let mut input = registration("alice", "alice@example.com");
    input.cover_image_path = Some(PathBuf::from("/tmp/fail-cover.png"));

    let profile = h.service.register(input).await.unwrap();
    assert!(profile.cover_image.is_empty());
}

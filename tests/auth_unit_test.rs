//! Unit tests for the auth module: password checks, login outcomes and
//! token round trips.
//!
//! Run with: cargo test --test auth_unit_test

use rcc_api::auth::extract::CurrentUser;
use rcc_api::auth::{login_outcome, password, token};
use rcc_api::config::{Config, Deployment};
use rcc_api::entity::users;
use rcc_api::error::AppError;

fn test_config(secret: &str) -> Config {
    Config {
        ops_database_url: "sqlite::memory:".to_string(),
        stats_database_url: "sqlite::memory:".to_string(),
        auth_database_url: "sqlite::memory:".to_string(),
        jwt_secret: secret.to_string(),
        access_token_minutes: 15,
        refresh_token_days: 7,
        api_host: "127.0.0.1".to_string(),
        api_port: 3000,
        deployment: Deployment::Local,
    }
}

fn user(password: &str) -> users::Model {
    users::Model {
        id: 42,
        email: "ops@example.com".to_string(),
        display_name: "Ops User".to_string(),
        role: "operator".to_string(),
        password: password.to_string(),
        is_active: true,
        created_at: chrono::Utc::now().into(),
    }
}

#[test]
fn bcrypt_passwords_verify() {
    // Low cost keeps the test fast.
    let hash = bcrypt::hash("s3cret", 4).unwrap();

    assert!(password::verify("s3cret", &hash));
    assert!(!password::verify("wrong", &hash));
}

#[test]
fn legacy_plaintext_passwords_compare_bytewise() {
    assert!(password::verify("opensesame", "opensesame"));
    assert!(!password::verify("opensesame", "OpenSesame"));
}

#[test]
fn unknown_email_fails_with_null_user() {
    let outcome = login_outcome(None, "anything");

    assert!(!outcome.success);
    assert_eq!(outcome.user_id, None);
    assert!(outcome.reason.is_some());
}

#[test]
fn wrong_password_fails_with_user_id() {
    let hash = bcrypt::hash("right", 4).unwrap();
    let account = user(&hash);

    let outcome = login_outcome(Some(&account), "wrong");
    assert!(!outcome.success);
    assert_eq!(outcome.user_id, Some(42));
    assert!(outcome.reason.is_some());
}

#[test]
fn inactive_account_is_refused() {
    let mut account = user("opensesame");
    account.is_active = false;

    let outcome = login_outcome(Some(&account), "opensesame");
    assert!(!outcome.success);
    assert_eq!(outcome.user_id, Some(42));
}

#[test]
fn correct_password_succeeds_without_reason() {
    let hash = bcrypt::hash("right", 4).unwrap();
    let account = user(&hash);

    let outcome = login_outcome(Some(&account), "right");
    assert!(outcome.success);
    assert_eq!(outcome.user_id, Some(42));
    assert_eq!(outcome.reason, None);
}

#[test]
fn tokens_round_trip_identity_claims() {
    let config = test_config("unit-test-secret");
    let account = user("irrelevant");

    let access = token::issue_access_token(&account, &config).unwrap();
    let claims = token::decode_claims(&access, &config).unwrap();

    assert_eq!(claims.usrid, 42);
    assert_eq!(claims.usrnamedisplay, "Ops User");
    assert_eq!(claims.usrrolename, "operator");
    assert!(claims.exp > claims.iat);
}

#[test]
fn refresh_token_outlives_access_token() {
    let config = test_config("unit-test-secret");
    let account = user("irrelevant");

    let access = token::decode_claims(
        &token::issue_access_token(&account, &config).unwrap(),
        &config,
    )
    .unwrap();
    let refresh = token::decode_claims(
        &token::issue_refresh_token(&account, &config).unwrap(),
        &config,
    )
    .unwrap();

    assert!(refresh.exp > access.exp);
}

#[test]
fn expired_token_is_unauthorized() {
    let mut config = test_config("unit-test-secret");
    // Issue a token that expired five minutes ago.
    config.access_token_minutes = -5;
    let account = user("irrelevant");

    let stale = token::issue_access_token(&account, &config).unwrap();
    assert!(matches!(
        token::decode_claims(&stale, &config),
        Err(AppError::Unauthorized(_))
    ));
}

#[test]
fn token_signed_with_other_secret_is_rejected() {
    let config = test_config("unit-test-secret");
    let other = test_config("some-other-secret");
    let account = user("irrelevant");

    let foreign = token::issue_access_token(&account, &other).unwrap();
    assert!(matches!(
        token::decode_claims(&foreign, &config),
        Err(AppError::Unauthorized(_))
    ));
}

#[test]
fn role_guard_allows_listed_roles_only() {
    let admin = CurrentUser {
        id: 1,
        display_name: "Admin".to_string(),
        role: "admin".to_string(),
    };
    let viewer = CurrentUser {
        id: 2,
        display_name: "Viewer".to_string(),
        role: "viewer".to_string(),
    };

    assert!(admin.require_role(&["admin"]).is_ok());
    assert!(matches!(
        viewer.require_role(&["admin"]),
        Err(AppError::Forbidden(_))
    ));
    assert!(viewer.require_role(&["admin", "viewer"]).is_ok());
}

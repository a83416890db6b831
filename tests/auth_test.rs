mod common;

use std::net::{IpAddr, Ipv4Addr};

use thesisflow::auth::password::{hash_password, verify_password};
use thesisflow::auth::rate_limit::RateLimiter;
use thesisflow::models::user::{self, Role};

#[test]
fn test_password_hash_roundtrip() {
    let hash = hash_password("correct horse battery staple").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(verify_password("correct horse battery staple", &hash).unwrap());
    assert!(!verify_password("wrong password", &hash).unwrap());
}

#[test]
fn test_password_hashes_are_salted() {
    let a = hash_password("same input").unwrap();
    let b = hash_password("same input").unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_verify_rejects_malformed_hash() {
    assert!(verify_password("anything", "not-a-phc-string").is_err());
}

#[test]
fn test_rate_limiter_blocks_after_five_failures() {
    let limiter = RateLimiter::new();
    let ip = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 7));
    let other = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 8));

    for _ in 0..4 {
        limiter.record_failure(ip);
    }
    assert!(!limiter.is_blocked(ip));

    limiter.record_failure(ip);
    assert!(limiter.is_blocked(ip));
    assert!(!limiter.is_blocked(other));

    limiter.clear(ip);
    assert!(!limiter.is_blocked(ip));
}

#[tokio::test]
async fn test_find_by_username_resolves_role_per_table() {
    let pool = common::setup_test_db().await;
    let student_id = common::create_student(&pool, "alice").await;
    let professor_id = common::create_professor(&pool, "bob").await;

    let (role, creds) = user::find_by_username(&pool, "alice").await.unwrap().unwrap();
    assert_eq!(role, Role::Student);
    assert_eq!(creds.id, student_id);
    assert!(verify_password(common::TEST_PASSWORD, &creds.password).unwrap());

    let (role, creds) = user::find_by_username(&pool, "bob").await.unwrap().unwrap();
    assert_eq!(role, Role::Professor);
    assert_eq!(creds.id, professor_id);

    assert!(user::find_by_username(&pool, "nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_username_exists_spans_all_tables() {
    let pool = common::setup_test_db().await;
    common::create_student(&pool, "alice").await;

    sqlx::query("INSERT INTO secretariat (username, password, name) VALUES ('desk', 'x', 'Desk')")
        .execute(&pool)
        .await
        .unwrap();

    assert!(user::username_exists(&pool, "alice").await.unwrap());
    assert!(user::username_exists(&pool, "desk").await.unwrap());
    assert!(!user::username_exists(&pool, "ghost").await.unwrap());
}

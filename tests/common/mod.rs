//! Shared test infrastructure for model layer tests.
//!
//! `setup_test_db()` opens an in-memory SQLite pool with the schema
//! applied; the seed helpers build the accounts and thesis fixtures the
//! domain tests need.

#![allow(dead_code)]

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

use thesisflow::auth::password;
use thesisflow::db::MIGRATIONS;
use thesisflow::models::user::{self, NewProfessor, NewStudent};
use thesisflow::models::{committee, thesis, topic};

pub const TEST_PASSWORD: &str = "password123";

pub async fn setup_test_db() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Bad connection string")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to open test DB");

    sqlx::raw_sql(MIGRATIONS)
        .execute(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn create_student(pool: &SqlitePool, username: &str) -> i64 {
    let hash = password::hash_password(TEST_PASSWORD).expect("hash");
    let new = NewStudent {
        student_number: format!("AM-{username}"),
        username: username.to_string(),
        password: hash,
        name: format!("Student {username}"),
        email: format!("{username}@uni.test"),
    };
    user::create_student(pool, &new).await.expect("create student")
}

pub async fn create_professor(pool: &SqlitePool, username: &str) -> i64 {
    let hash = password::hash_password(TEST_PASSWORD).expect("hash");
    let new = NewProfessor {
        username: username.to_string(),
        password: hash,
        name: format!("Prof. {username}"),
        email: format!("{username}@uni.test"),
        department: "Informatics".to_string(),
    };
    user::create_professor(pool, &new).await.expect("create professor")
}

pub async fn create_topic(pool: &SqlitePool, professor_id: i64, title: &str) -> i64 {
    let new = topic::NewTopic {
        title: title.to_string(),
        summary: "A topic summary".to_string(),
    };
    topic::create(pool, professor_id, &new, "2025-01-01T00:00:00Z")
        .await
        .expect("create topic")
}

/// Professor + student + topic, assigned: a thesis in `under_assignment`.
/// Returns (thesis_id, topic_id, student_id, supervisor_id).
pub async fn assigned_thesis(pool: &SqlitePool, tag: &str) -> (i64, i64, i64, i64) {
    let supervisor_id = create_professor(pool, &format!("sup_{tag}")).await;
    let student_id = create_student(pool, &format!("stu_{tag}")).await;
    let topic_id = create_topic(pool, supervisor_id, &format!("Topic {tag}")).await;
    let thesis_id = thesis::assign(pool, topic_id, student_id, supervisor_id, "2025-01-10")
        .await
        .expect("assign");
    (thesis_id, topic_id, student_id, supervisor_id)
}

/// Accept an invitation on behalf of a fresh professor.
pub async fn accept_with_new_professor(
    pool: &SqlitePool,
    thesis_id: i64,
    supervisor_id: i64,
    username: &str,
) -> i64 {
    let professor_id = create_professor(pool, username).await;
    let invitation_id =
        committee::invite(pool, thesis_id, supervisor_id, professor_id, "2025-01-11T00:00:00Z")
            .await
            .expect("invite");
    committee::respond(pool, invitation_id, professor_id, true, "2025-01-12T00:00:00Z")
        .await
        .expect("accept");
    professor_id
}

/// Assigned thesis brought to `active` by two committee acceptances.
/// Returns (thesis_id, topic_id, student_id, supervisor_id, member_a, member_b).
pub async fn active_thesis(pool: &SqlitePool, tag: &str) -> (i64, i64, i64, i64, i64, i64) {
    let (thesis_id, topic_id, student_id, supervisor_id) = assigned_thesis(pool, tag).await;
    let member_a =
        accept_with_new_professor(pool, thesis_id, supervisor_id, &format!("mem_a_{tag}")).await;
    let member_b =
        accept_with_new_professor(pool, thesis_id, supervisor_id, &format!("mem_b_{tag}")).await;
    (thesis_id, topic_id, student_id, supervisor_id, member_a, member_b)
}

use sqlx::SqlitePool;

use super::types::*;
use crate::errors::AppError;
use crate::models::committee;

/// Submit a grade for a thesis under examination.
///
/// Only the supervisor and accepted committee members may grade; the
/// committee members are blocked until the supervisor has graded; one
/// grade per professor.
pub async fn submit(
    pool: &SqlitePool,
    thesis_id: i64,
    supervisor_id: i64,
    professor_id: i64,
    new: &NewGrade,
    graded_at: &str,
) -> Result<(), AppError> {
    if !(0.0..=10.0).contains(&new.grade) {
        return Err(AppError::Validation(
            "Ο βαθμός πρέπει να είναι μεταξύ 0 και 10".to_string(),
        ));
    }

    let is_supervisor = professor_id == supervisor_id;
    if !is_supervisor && !committee::is_accepted_member(pool, thesis_id, professor_id).await? {
        return Err(AppError::Forbidden(
            "Μόνο τα μέλη της τριμελούς επιτροπής βαθμολογούν".to_string(),
        ));
    }

    if !is_supervisor {
        let supervisor_graded: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM grades WHERE thesis_id = ?1 AND professor_id = ?2",
        )
        .bind(thesis_id)
        .bind(supervisor_id)
        .fetch_one(pool)
        .await?;
        if supervisor_graded == 0 {
            return Err(AppError::Conflict(
                "Βαθμολογεί πρώτα ο επιβλέπων καθηγητής".to_string(),
            ));
        }
    }

    let already: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM grades WHERE thesis_id = ?1 AND professor_id = ?2",
    )
    .bind(thesis_id)
    .bind(professor_id)
    .fetch_one(pool)
    .await?;
    if already > 0 {
        return Err(AppError::Conflict("Έχετε ήδη υποβάλει βαθμό".to_string()));
    }

    sqlx::query(
        "INSERT INTO grades (thesis_id, professor_id, grade, criteria, graded_at) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(thesis_id)
    .bind(professor_id)
    .bind(new.grade)
    .bind(&new.criteria)
    .bind(graded_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_for_thesis(
    pool: &SqlitePool,
    thesis_id: i64,
) -> Result<Vec<GradeView>, AppError> {
    let rows = sqlx::query_as::<_, GradeView>(
        "SELECT g.professor_id, p.name AS professor_name, g.grade, g.criteria, g.graded_at \
         FROM grades g \
         JOIN professors p ON p.id = g.professor_id \
         WHERE g.thesis_id = ?1 \
         ORDER BY g.graded_at",
    )
    .bind(thesis_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count_for_thesis(pool: &SqlitePool, thesis_id: i64) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM grades WHERE thesis_id = ?1")
        .bind(thesis_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

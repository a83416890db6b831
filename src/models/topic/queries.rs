use sqlx::SqlitePool;

use super::types::*;
use crate::errors::AppError;

pub async fn create(
    pool: &SqlitePool,
    professor_id: i64,
    new: &NewTopic,
    created_at: &str,
) -> Result<i64, AppError> {
    let result = sqlx::query(
        "INSERT INTO topics (professor_id, title, summary, created_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(professor_id)
    .bind(&new.title)
    .bind(&new.summary)
    .bind(created_at)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<TopicRow>, AppError> {
    let row = sqlx::query_as::<_, TopicRow>(
        "SELECT id, professor_id, title, summary, pdf_path, created_at FROM topics WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Topics owned by a professor, joined with the current non-cancelled
/// thesis (if any) so the list shows assignment state.
pub async fn find_by_professor(
    pool: &SqlitePool,
    professor_id: i64,
) -> Result<Vec<TopicListItem>, AppError> {
    let rows = sqlx::query_as::<_, TopicListItem>(
        "SELECT t.id, t.title, t.summary, t.pdf_path, t.created_at, \
                th.id AS thesis_id, th.status AS thesis_status, s.name AS student_name \
         FROM topics t \
         LEFT JOIN theses th ON th.topic_id = t.id AND th.status != 'cancelled' \
         LEFT JOIN students s ON s.id = th.student_id \
         WHERE t.professor_id = ?1 \
         ORDER BY t.created_at DESC",
    )
    .bind(professor_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Topics with no non-cancelled thesis, i.e. open for assignment.
pub async fn find_available(pool: &SqlitePool) -> Result<Vec<AvailableTopic>, AppError> {
    let rows = sqlx::query_as::<_, AvailableTopic>(
        "SELECT t.id, t.title, t.summary, t.pdf_path, p.name AS professor_name \
         FROM topics t \
         JOIN professors p ON p.id = t.professor_id \
         WHERE NOT EXISTS ( \
             SELECT 1 FROM theses th WHERE th.topic_id = t.id AND th.status != 'cancelled') \
         ORDER BY t.created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn update(pool: &SqlitePool, id: i64, update: &TopicUpdate) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE topics SET title = COALESCE(?1, title), summary = COALESCE(?2, summary) \
         WHERE id = ?3",
    )
    .bind(&update.title)
    .bind(&update.summary)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn set_pdf_path(pool: &SqlitePool, id: i64, pdf_path: &str) -> Result<(), AppError> {
    sqlx::query("UPDATE topics SET pdf_path = ?1 WHERE id = ?2")
        .bind(pdf_path)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM topics WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

/// True if the topic currently carries a non-cancelled thesis.
pub async fn is_assigned(pool: &SqlitePool, id: i64) -> Result<bool, AppError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM theses WHERE topic_id = ?1 AND status != 'cancelled'",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

use serde::Serialize;
use sqlx::SqlitePool;

use crate::errors::AppError;

#[derive(Debug, Clone, Serialize, Default)]
pub struct SecretariatStats {
    pub under_assignment: i64,
    pub active: i64,
    pub under_examination: i64,
    pub completed: i64,
    pub cancelled: i64,
    pub completed_avg_grade: Option<f64>,
    pub avg_completion_days: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct ProfessorStats {
    pub supervised_total: i64,
    pub supervised_in_progress: i64,
    pub committee_total: i64,
    pub supervised_avg_grade: Option<f64>,
    pub avg_completion_days: Option<f64>,
}

async fn count_by_status(pool: &SqlitePool, status: &str) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM theses WHERE status = ?1")
        .bind(status)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Department-wide aggregates for the secretariat dashboard.
pub async fn secretariat_stats(pool: &SqlitePool) -> Result<SecretariatStats, AppError> {
    let completed_avg_grade: Option<f64> =
        sqlx::query_scalar("SELECT AVG(final_grade) FROM theses WHERE status = 'completed'")
            .fetch_one(pool)
            .await?;

    let avg_completion_days: Option<f64> = sqlx::query_scalar(
        "SELECT AVG(julianday(completed_at) - julianday(assigned_at)) \
         FROM theses WHERE status = 'completed'",
    )
    .fetch_one(pool)
    .await?;

    Ok(SecretariatStats {
        under_assignment: count_by_status(pool, "under_assignment").await?,
        active: count_by_status(pool, "active").await?,
        under_examination: count_by_status(pool, "under_examination").await?,
        completed: count_by_status(pool, "completed").await?,
        cancelled: count_by_status(pool, "cancelled").await?,
        completed_avg_grade,
        avg_completion_days,
    })
}

/// Per-professor aggregates: supervision and committee load, grades,
/// completion times.
pub async fn professor_stats(
    pool: &SqlitePool,
    professor_id: i64,
) -> Result<ProfessorStats, AppError> {
    let supervised_total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM theses WHERE supervisor_id = ?1")
            .bind(professor_id)
            .fetch_one(pool)
            .await?;

    let supervised_in_progress: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM theses WHERE supervisor_id = ?1 \
         AND status IN ('under_assignment', 'active', 'under_examination')",
    )
    .bind(professor_id)
    .fetch_one(pool)
    .await?;

    let committee_total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM committee_members \
         WHERE professor_id = ?1 AND response = 'accepted'",
    )
    .bind(professor_id)
    .fetch_one(pool)
    .await?;

    let supervised_avg_grade: Option<f64> = sqlx::query_scalar(
        "SELECT AVG(final_grade) FROM theses \
         WHERE supervisor_id = ?1 AND status = 'completed'",
    )
    .bind(professor_id)
    .fetch_one(pool)
    .await?;

    let avg_completion_days: Option<f64> = sqlx::query_scalar(
        "SELECT AVG(julianday(completed_at) - julianday(assigned_at)) \
         FROM theses WHERE supervisor_id = ?1 AND status = 'completed'",
    )
    .bind(professor_id)
    .fetch_one(pool)
    .await?;

    Ok(ProfessorStats {
        supervised_total,
        supervised_in_progress,
        committee_total,
        supervised_avg_grade,
        avg_completion_days,
    })
}

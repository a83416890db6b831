use sqlx::SqlitePool;

use super::types::ExportPayload;
use crate::errors::AppError;
use crate::models::user;

/// Dump both rosters without password hashes.
pub async fn export_roster(pool: &SqlitePool) -> Result<ExportPayload, AppError> {
    let students = user::list_students(pool).await?;
    let professors = user::list_professors(pool).await?;
    Ok(ExportPayload {
        students,
        professors,
    })
}

use sqlx::SqlitePool;

use super::types::*;
use crate::errors::AppError;

pub async fn upsert_draft(
    pool: &SqlitePool,
    thesis_id: i64,
    file_path: &str,
    uploaded_at: &str,
) -> Result<(), AppError> {
    sqlx::query(
        "INSERT INTO drafts (thesis_id, file_path, uploaded_at) VALUES (?1, ?2, ?3) \
         ON CONFLICT(thesis_id) DO UPDATE SET file_path = ?2, uploaded_at = ?3",
    )
    .bind(thesis_id)
    .bind(file_path)
    .bind(uploaded_at)
    .execute(pool)
    .await?;
    Ok(())
}

/// Supplementary links (video, slides, code) on an existing draft row.
pub async fn set_draft_links(
    pool: &SqlitePool,
    thesis_id: i64,
    external_links: &str,
) -> Result<(), AppError> {
    let result = sqlx::query("UPDATE drafts SET external_links = ?1 WHERE thesis_id = ?2")
        .bind(external_links)
        .bind(thesis_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::Conflict(
            "Δεν έχει μεταφορτωθεί πρόχειρο κείμενο".to_string(),
        ));
    }
    Ok(())
}

pub async fn find_draft(pool: &SqlitePool, thesis_id: i64) -> Result<Option<Draft>, AppError> {
    let row = sqlx::query_as::<_, Draft>(
        "SELECT thesis_id, file_path, external_links, uploaded_at FROM drafts \
         WHERE thesis_id = ?1",
    )
    .bind(thesis_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn upsert_presentation(
    pool: &SqlitePool,
    thesis_id: i64,
    form: &PresentationForm,
    announced_at: &str,
) -> Result<(), AppError> {
    if form.mode != "in_person" && form.mode != "online" {
        return Err(AppError::Validation(
            "Ο τρόπος παρουσίασης πρέπει να είναι 'in_person' ή 'online'".to_string(),
        ));
    }
    if form.scheduled_at.is_empty() || form.venue.is_empty() {
        return Err(AppError::Validation("Λείπουν υποχρεωτικά πεδία".to_string()));
    }

    sqlx::query(
        "INSERT INTO presentations (thesis_id, scheduled_at, mode, venue, announced_at) \
         VALUES (?1, ?2, ?3, ?4, ?5) \
         ON CONFLICT(thesis_id) DO UPDATE SET \
             scheduled_at = ?2, mode = ?3, venue = ?4, announced_at = ?5",
    )
    .bind(thesis_id)
    .bind(&form.scheduled_at)
    .bind(&form.mode)
    .bind(&form.venue)
    .bind(announced_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_presentation(
    pool: &SqlitePool,
    thesis_id: i64,
) -> Result<Option<Presentation>, AppError> {
    let row = sqlx::query_as::<_, Presentation>(
        "SELECT thesis_id, scheduled_at, mode, venue, announced_at FROM presentations \
         WHERE thesis_id = ?1",
    )
    .bind(thesis_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn upsert_library(
    pool: &SqlitePool,
    thesis_id: i64,
    repository_link: &str,
    submitted_at: &str,
) -> Result<(), AppError> {
    if repository_link.is_empty() {
        return Err(AppError::Validation(
            "Απαιτείται σύνδεσμος αποθετηρίου".to_string(),
        ));
    }

    sqlx::query(
        "INSERT INTO library_submissions (thesis_id, repository_link, submitted_at) \
         VALUES (?1, ?2, ?3) \
         ON CONFLICT(thesis_id) DO UPDATE SET repository_link = ?2, submitted_at = ?3",
    )
    .bind(thesis_id)
    .bind(repository_link)
    .bind(submitted_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_library(
    pool: &SqlitePool,
    thesis_id: i64,
) -> Result<Option<LibrarySubmission>, AppError> {
    let row = sqlx::query_as::<_, LibrarySubmission>(
        "SELECT thesis_id, repository_link, submitted_at FROM library_submissions \
         WHERE thesis_id = ?1",
    )
    .bind(thesis_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

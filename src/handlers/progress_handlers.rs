use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::SqlitePool;

use crate::auth::session::require_role;
use crate::errors::AppError;
use crate::models::progress::{self, DraftLinksForm, LibraryForm, PresentationForm};
use crate::models::thesis::{self, ThesisRow, ThesisStatus};
use crate::models::user::Role;

use super::now;
use super::topic_handlers::UPLOAD_DIR;

/// Fetch a thesis and check the session student is its assignee.
async fn find_own_thesis(
    pool: &SqlitePool,
    session: &Session,
    thesis_id: i64,
) -> Result<ThesisRow, AppError> {
    let student_id = require_role(session, Role::Student)?;
    let th = thesis::find_by_id(pool, thesis_id).await?.ok_or(AppError::NotFound)?;
    if th.student_id != student_id {
        return Err(AppError::Forbidden(
            "Η διπλωματική ανήκει σε άλλον φοιτητή".to_string(),
        ));
    }
    Ok(th)
}

/// PUT /api/theses/{id}/draft — upload the draft text (raw body bytes)
/// while the thesis is active or under examination.
pub async fn upload_draft(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let thesis_id = path.into_inner();
    let th = find_own_thesis(&pool, &session, thesis_id).await?;

    let status = th.status()?;
    if status != ThesisStatus::Active && status != ThesisStatus::UnderExamination {
        return Err(AppError::Conflict(
            "Το πρόχειρο κείμενο υποβάλλεται μόνο σε ενεργή ή υπό εξέταση διπλωματική".to_string(),
        ));
    }
    if body.is_empty() {
        return Err(AppError::Validation("Κενό αρχείο".to_string()));
    }

    let file_name = format!("draft_{thesis_id}.pdf");
    let disk_path = format!("{UPLOAD_DIR}/{file_name}");
    std::fs::write(&disk_path, &body)
        .map_err(|e| AppError::Validation(format!("Αποτυχία αποθήκευσης αρχείου: {e}")))?;

    let public_path = format!("/uploads/{file_name}");
    progress::upsert_draft(&pool, thesis_id, &public_path, &now()).await?;
    Ok(HttpResponse::Ok().json(json!({ "file_path": public_path })))
}

/// PATCH /api/theses/{id}/draft — set the supplementary external links.
pub async fn set_draft_links(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Json<DraftLinksForm>,
) -> Result<HttpResponse, AppError> {
    let thesis_id = path.into_inner();
    find_own_thesis(&pool, &session, thesis_id).await?;

    progress::set_draft_links(&pool, thesis_id, &form.external_links).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

/// POST /api/theses/{id}/presentation — record the examination
/// presentation details; feeds the public announcements.
pub async fn set_presentation(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Json<PresentationForm>,
) -> Result<HttpResponse, AppError> {
    let thesis_id = path.into_inner();
    let th = find_own_thesis(&pool, &session, thesis_id).await?;

    if th.status()? != ThesisStatus::UnderExamination {
        return Err(AppError::Conflict(
            "Η παρουσίαση ορίζεται μόνο όσο η διπλωματική είναι υπό εξέταση".to_string(),
        ));
    }

    progress::upsert_presentation(&pool, thesis_id, &form, &now()).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

/// POST /api/theses/{id}/library — store the institutional repository
/// link, a prerequisite of completion.
pub async fn set_library(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Json<LibraryForm>,
) -> Result<HttpResponse, AppError> {
    let thesis_id = path.into_inner();
    let th = find_own_thesis(&pool, &session, thesis_id).await?;

    if th.status()? != ThesisStatus::UnderExamination {
        return Err(AppError::Conflict(
            "Η κατάθεση στη βιβλιοθήκη γίνεται μόνο όσο η διπλωματική είναι υπό εξέταση"
                .to_string(),
        ));
    }

    progress::upsert_library(&pool, thesis_id, &form.repository_link, &now()).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

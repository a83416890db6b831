use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::SqlitePool;

use crate::auth::session::require_role;
use crate::errors::AppError;
use crate::models::committee::{self, InviteForm};
use crate::models::thesis::{self, ThesisStatus};
use crate::models::user::Role;

use super::now;

/// POST /api/theses/{id}/invitations — the assigned student invites a
/// professor to the committee while the thesis is under assignment.
pub async fn create(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Json<InviteForm>,
) -> Result<HttpResponse, AppError> {
    let student_id = require_role(&session, Role::Student)?;

    let thesis_id = path.into_inner();
    let th = thesis::find_by_id(&pool, thesis_id).await?.ok_or(AppError::NotFound)?;
    if th.student_id != student_id {
        return Err(AppError::Forbidden(
            "Η διπλωματική ανήκει σε άλλον φοιτητή".to_string(),
        ));
    }
    if th.status()? != ThesisStatus::UnderAssignment {
        return Err(AppError::Conflict(
            "Προσκλήσεις αποστέλλονται μόνο όσο η διπλωματική είναι υπό ανάθεση".to_string(),
        ));
    }

    let id = committee::invite(&pool, thesis_id, th.supervisor_id, form.professor_id, &now()).await?;
    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

/// GET /api/invitations — the professor's pending invitations.
pub async fn list(pool: web::Data<SqlitePool>, session: Session) -> Result<HttpResponse, AppError> {
    let professor_id = require_role(&session, Role::Professor)?;
    let items = committee::find_pending_for_professor(&pool, professor_id).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// POST /api/invitations/{id}/accept — may flip the thesis to active
/// when the acceptance reaches quorum.
pub async fn accept(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let professor_id = require_role(&session, Role::Professor)?;
    let status = committee::respond(&pool, path.into_inner(), professor_id, true, &now()).await?;
    Ok(HttpResponse::Ok().json(json!({ "thesis_status": status })))
}

/// POST /api/invitations/{id}/reject
pub async fn reject(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let professor_id = require_role(&session, Role::Professor)?;
    let status = committee::respond(&pool, path.into_inner(), professor_id, false, &now()).await?;
    Ok(HttpResponse::Ok().json(json!({ "thesis_status": status })))
}

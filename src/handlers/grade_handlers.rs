use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::SqlitePool;

use crate::auth::session::{require_login, require_role};
use crate::errors::AppError;
use crate::models::grading::{self, NewGrade};
use crate::models::thesis::{self, ThesisStatus};
use crate::models::user::Role;

use super::now;

/// POST /api/theses/{id}/grades — supervisor or accepted committee
/// member submits one grade while the thesis is under examination.
pub async fn submit(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Json<NewGrade>,
) -> Result<HttpResponse, AppError> {
    let professor_id = require_role(&session, Role::Professor)?;

    let thesis_id = path.into_inner();
    let th = thesis::find_by_id(&pool, thesis_id).await?.ok_or(AppError::NotFound)?;
    if th.status()? != ThesisStatus::UnderExamination {
        return Err(AppError::Conflict(
            "Βαθμοί υποβάλλονται μόνο όσο η διπλωματική είναι υπό εξέταση".to_string(),
        ));
    }

    grading::submit(&pool, thesis_id, th.supervisor_id, professor_id, &form, &now()).await?;
    Ok(HttpResponse::Created().json(json!({ "ok": true })))
}

/// GET /api/theses/{id}/grades — participants and secretariat.
pub async fn list(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let (user_id, role) = require_login(&session)?;

    let thesis_id = path.into_inner();
    let th = thesis::find_by_id(&pool, thesis_id).await?.ok_or(AppError::NotFound)?;

    let allowed = match role {
        Role::Secretariat => true,
        Role::Student => th.student_id == user_id,
        Role::Professor => {
            th.supervisor_id == user_id
                || crate::models::committee::is_accepted_member(&pool, thesis_id, user_id).await?
        }
    };
    if !allowed {
        return Err(AppError::Forbidden(
            "Δεν έχετε δικαίωμα για αυτή την ενέργεια".to_string(),
        ));
    }

    let grades = grading::find_for_thesis(&pool, thesis_id).await?;
    Ok(HttpResponse::Ok().json(grades))
}

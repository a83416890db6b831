use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde_json::json;
use sqlx::SqlitePool;

use crate::auth::session::{require_login, require_role};
use crate::errors::AppError;
use crate::models::progress;
use crate::models::thesis::{self, CancelForm, GsForm, ThesisStatus, lifecycle};
use crate::models::user::Role;

use super::today;

/// GET /api/thesis-details/{topic_id} — full joined view of the thesis
/// behind a topic.
pub async fn details(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_login(&session)?;

    let topic_id = path.into_inner();
    let detail = thesis::find_detail_by_topic(&pool, topic_id)
        .await?
        .ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(detail))
}

/// GET /api/theses/mine — the requesting user's theses.
pub async fn mine(pool: web::Data<SqlitePool>, session: Session) -> Result<HttpResponse, AppError> {
    let (user_id, role) = require_login(&session)?;

    let items = match role {
        Role::Student => thesis::find_mine_student(&pool, user_id).await?,
        Role::Professor => thesis::find_mine_professor(&pool, user_id).await?,
        Role::Secretariat => thesis::find_in_progress(&pool).await?,
    };
    Ok(HttpResponse::Ok().json(items))
}

/// PATCH /api/theses/{id}/gs — secretariat records the GS assignment
/// reference; the first write stamps the official assignment date.
pub async fn set_gs(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Json<GsForm>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, Role::Secretariat)?;

    if form.gs_number.trim().is_empty() || form.gs_year.trim().is_empty() {
        return Err(AppError::Validation(
            "Απαιτούνται αριθμός και έτος ΓΣ".to_string(),
        ));
    }

    let thesis_id = path.into_inner();
    thesis::set_gs_reference(&pool, thesis_id, &form.gs_number, &form.gs_year, &today()).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

/// POST /api/theses/{id}/under-examination — the supervisor moves an
/// active thesis to examination once a draft exists.
pub async fn to_under_examination(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let professor_id = require_role(&session, Role::Professor)?;

    let thesis_id = path.into_inner();
    let th = thesis::find_by_id(&pool, thesis_id).await?.ok_or(AppError::NotFound)?;
    if th.supervisor_id != professor_id {
        return Err(AppError::Forbidden(
            "Μόνο ο επιβλέπων μπορεί να θέσει τη διπλωματική υπό εξέταση".to_string(),
        ));
    }

    lifecycle::validate_transition(th.status()?, ThesisStatus::UnderExamination)?;

    if progress::find_draft(&pool, thesis_id).await?.is_none() {
        return Err(AppError::Conflict(
            "Δεν έχει μεταφορτωθεί πρόχειρο κείμενο της διπλωματικής".to_string(),
        ));
    }

    thesis::update_status(&pool, thesis_id, ThesisStatus::UnderExamination).await?;
    Ok(HttpResponse::Ok().json(json!({ "status": ThesisStatus::UnderExamination })))
}

/// POST /api/theses/{id}/cancel — supervisor (two-year rule) or
/// secretariat (GS cancellation reference + reason).
pub async fn cancel(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Json<CancelForm>,
) -> Result<HttpResponse, AppError> {
    let (user_id, role) = require_login(&session)?;

    let thesis_id = path.into_inner();
    let th = thesis::find_by_id(&pool, thesis_id).await?.ok_or(AppError::NotFound)?;

    lifecycle::validate_transition(th.status()?, ThesisStatus::Cancelled)?;

    match role {
        Role::Professor => {
            if th.supervisor_id != user_id {
                return Err(AppError::Forbidden(
                    "Μόνο ο επιβλέπων μπορεί να ακυρώσει τη διπλωματική".to_string(),
                ));
            }
            let today = chrono::Utc::now().date_naive();
            lifecycle::check_supervisor_tenure(th.official_assigned_at.as_deref(), today)?;

            let reason = form
                .reason
                .clone()
                .unwrap_or_else(|| "Ακύρωση από τον επιβλέποντα".to_string());
            thesis::cancel(&pool, thesis_id, &reason, None, None).await?;
        }
        Role::Secretariat => {
            let (Some(gs_number), Some(gs_year), Some(reason)) =
                (&form.gs_number, &form.gs_year, &form.reason)
            else {
                return Err(AppError::Validation(
                    "Απαιτούνται αριθμός ΓΣ, έτος και αιτιολογία ακύρωσης".to_string(),
                ));
            };
            thesis::cancel(&pool, thesis_id, reason, Some(gs_number), Some(gs_year)).await?;
        }
        Role::Student => {
            return Err(AppError::Forbidden(
                "Δεν έχετε δικαίωμα για αυτή την ενέργεια".to_string(),
            ));
        }
    }

    Ok(HttpResponse::Ok().json(json!({ "status": ThesisStatus::Cancelled })))
}

/// POST /api/theses/{id}/complete — secretariat finalizes a thesis under
/// examination; the final grade is the two-decimal mean of the grades.
pub async fn complete(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, Role::Secretariat)?;

    let thesis_id = path.into_inner();
    let th = thesis::find_by_id(&pool, thesis_id).await?.ok_or(AppError::NotFound)?;
    lifecycle::validate_transition(th.status()?, ThesisStatus::Completed)?;

    let final_grade = thesis::complete(&pool, thesis_id, &today()).await?;
    Ok(HttpResponse::Ok().json(json!({
        "status": ThesisStatus::Completed,
        "final_grade": final_grade,
    })))
}

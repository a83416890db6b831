use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;

use crate::auth::session::{require_login, require_role};
use crate::errors::AppError;
use crate::models::thesis::{self, ThesisStatus};
use crate::models::topic::{self, NewTopic, TopicUpdate};
use crate::models::user::Role;

use super::{now, today};

pub const UPLOAD_DIR: &str = "data/uploads";

/// GET /api/topics — professors see their own topics with assignment
/// state; students see the available pool.
pub async fn list(pool: web::Data<SqlitePool>, session: Session) -> Result<HttpResponse, AppError> {
    let (user_id, role) = require_login(&session)?;

    match role {
        Role::Professor => {
            let items = topic::find_by_professor(&pool, user_id).await?;
            Ok(HttpResponse::Ok().json(items))
        }
        _ => {
            let items = topic::find_available(&pool).await?;
            Ok(HttpResponse::Ok().json(items))
        }
    }
}

/// POST /api/topics
pub async fn create(
    pool: web::Data<SqlitePool>,
    session: Session,
    form: web::Json<NewTopic>,
) -> Result<HttpResponse, AppError> {
    let professor_id = require_role(&session, Role::Professor)?;

    if form.title.trim().is_empty() {
        return Err(AppError::Validation("Ο τίτλος είναι υποχρεωτικός".to_string()));
    }

    let id = topic::create(&pool, professor_id, &form, &now()).await?;
    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

/// Fetch a topic and check the session professor owns it.
async fn find_owned(
    pool: &SqlitePool,
    session: &Session,
    topic_id: i64,
) -> Result<topic::TopicRow, AppError> {
    let professor_id = require_role(session, Role::Professor)?;
    let topic = topic::find_by_id(pool, topic_id).await?.ok_or(AppError::NotFound)?;
    if topic.professor_id != professor_id {
        return Err(AppError::Forbidden("Το θέμα ανήκει σε άλλον διδάσκοντα".to_string()));
    }
    Ok(topic)
}

/// PATCH /api/topics/{id} — editable until the thesis leaves
/// `under_assignment`.
pub async fn update(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Json<TopicUpdate>,
) -> Result<HttpResponse, AppError> {
    let topic_id = path.into_inner();
    find_owned(&pool, &session, topic_id).await?;

    if let Some(th) = thesis::find_by_topic(&pool, topic_id).await? {
        if th.status()? != ThesisStatus::UnderAssignment {
            return Err(AppError::Conflict(
                "Το θέμα δεν τροποποιείται μετά την οριστική ανάθεση".to_string(),
            ));
        }
    }

    topic::update(&pool, topic_id, &form).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

/// DELETE /api/topics/{id} — only while unassigned.
pub async fn delete(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let topic_id = path.into_inner();
    find_owned(&pool, &session, topic_id).await?;

    if topic::is_assigned(&pool, topic_id).await? {
        return Err(AppError::Conflict(
            "Το θέμα έχει ανατεθεί και δεν διαγράφεται".to_string(),
        ));
    }

    topic::delete(&pool, topic_id).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

/// PUT /api/topics/{id}/file — upload the descriptive PDF as the raw
/// request body; stored under a fixed per-topic name and served by the
/// static /uploads mount.
pub async fn upload_file(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let topic_id = path.into_inner();
    find_owned(&pool, &session, topic_id).await?;

    if body.is_empty() {
        return Err(AppError::Validation("Κενό αρχείο".to_string()));
    }

    let file_name = format!("topic_{topic_id}.pdf");
    let disk_path = format!("{UPLOAD_DIR}/{file_name}");
    std::fs::write(&disk_path, &body)
        .map_err(|e| AppError::Validation(format!("Αποτυχία αποθήκευσης αρχείου: {e}")))?;

    let public_path = format!("/uploads/{file_name}");
    topic::set_pdf_path(&pool, topic_id, &public_path).await?;
    Ok(HttpResponse::Ok().json(json!({ "pdf_path": public_path })))
}

#[derive(Deserialize)]
pub struct AssignForm {
    pub student_id: i64,
}

/// POST /api/topics/{id}/assign — create the thesis in `under_assignment`.
pub async fn assign(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
    form: web::Json<AssignForm>,
) -> Result<HttpResponse, AppError> {
    let topic_id = path.into_inner();
    let topic = find_owned(&pool, &session, topic_id).await?;

    crate::models::user::find_student_by_id(&pool, form.student_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let thesis_id =
        thesis::assign(&pool, topic_id, form.student_id, topic.professor_id, &today()).await?;
    Ok(HttpResponse::Created().json(json!({ "thesis_id": thesis_id })))
}

/// POST /api/topics/{id}/unassign — the owner professor or the assigned
/// student withdraws an assignment still under formation.
pub async fn unassign(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let topic_id = path.into_inner();
    let (user_id, role) = require_login(&session)?;

    let th = thesis::find_by_topic(&pool, topic_id).await?.ok_or(AppError::NotFound)?;

    let allowed = match role {
        Role::Professor => th.supervisor_id == user_id,
        Role::Student => th.student_id == user_id,
        Role::Secretariat => false,
    };
    if !allowed {
        return Err(AppError::Forbidden(
            "Δεν έχετε δικαίωμα για αυτή την ενέργεια".to_string(),
        ));
    }

    if th.status()? != ThesisStatus::UnderAssignment {
        return Err(AppError::Conflict(
            "Η ανάθεση αναιρείται μόνο όσο η διπλωματική είναι υπό ανάθεση".to_string(),
        ));
    }

    thesis::unassign(&pool, th.id).await?;
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

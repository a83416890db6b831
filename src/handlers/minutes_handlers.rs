use actix_session::Session;
use actix_web::{HttpResponse, web};
use askama::Template;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::auth::session::require_login;
use crate::errors::AppError;
use crate::models::committee;
use crate::models::thesis::{self, ThesisDetail, lifecycle};
use crate::models::user::Role;
use crate::templates_structs::{GradeLine, PraktikoDoc, PraktikoHtmlTemplate, PraktikoTextTemplate};

use super::today;

#[derive(Deserialize)]
pub struct MinutesQuery {
    #[serde(default)]
    pub format: Option<String>,
}

fn build_doc(detail: &ThesisDetail) -> PraktikoDoc {
    let members = detail
        .committee
        .iter()
        .filter(|m| m.response == "accepted")
        .map(|m| m.name.clone())
        .collect();

    let grades = detail
        .grades
        .iter()
        .map(|g| GradeLine {
            professor_name: g.professor_name.clone(),
            grade: format!("{:.2}", g.grade),
            criteria: g.criteria.clone(),
        })
        .collect::<Vec<_>>();

    let mean = detail.grades.iter().map(|g| g.grade).sum::<f64>() / detail.grades.len() as f64;
    let final_grade = detail
        .thesis
        .final_grade
        .unwrap_or_else(|| lifecycle::round_final_grade(mean));

    let gs_reference = match (&detail.thesis.gs_number, &detail.thesis.gs_year) {
        (Some(number), Some(year)) => format!("{number}/{year}"),
        _ => "—".to_string(),
    };

    let presentation_line = match &detail.presentation {
        Some(p) if p.mode == "online" => format!(
            "Η εξέταση πραγματοποιήθηκε διαδικτυακά στις {} ({}).",
            p.scheduled_at, p.venue
        ),
        Some(p) => format!(
            "Η εξέταση πραγματοποιήθηκε στις {} στην αίθουσα {}.",
            p.scheduled_at, p.venue
        ),
        None => "Η εξέταση πραγματοποιήθηκε ενώπιον της επιτροπής.".to_string(),
    };

    PraktikoDoc {
        title: detail.topic_title.clone(),
        student_name: detail.student_name.clone(),
        student_number: detail.student_number.clone(),
        supervisor_name: detail.supervisor_name.clone(),
        members,
        grades,
        final_grade: format!("{final_grade:.2}"),
        gs_reference,
        presentation_line,
        generated_on: today(),
    }
}

/// GET /api/theses/{id}/minutes?format=html|text — render the fixed
/// examination-minutes document once at least one grade exists.
pub async fn render(
    pool: web::Data<SqlitePool>,
    session: Session,
    path: web::Path<i64>,
    query: web::Query<MinutesQuery>,
) -> Result<HttpResponse, AppError> {
    let (user_id, role) = require_login(&session)?;

    let thesis_id = path.into_inner();
    let th = thesis::find_by_id(&pool, thesis_id).await?.ok_or(AppError::NotFound)?;

    let allowed = match role {
        Role::Secretariat => true,
        Role::Student => th.student_id == user_id,
        Role::Professor => {
            th.supervisor_id == user_id
                || committee::is_accepted_member(&pool, thesis_id, user_id).await?
        }
    };
    if !allowed {
        return Err(AppError::Forbidden(
            "Δεν έχετε δικαίωμα για αυτή την ενέργεια".to_string(),
        ));
    }

    let detail = thesis::find_detail_by_topic(&pool, th.topic_id)
        .await?
        .ok_or(AppError::NotFound)?;
    if detail.grades.is_empty() {
        return Err(AppError::Conflict(
            "Δεν έχουν υποβληθεί βαθμοί για τη διπλωματική".to_string(),
        ));
    }

    let doc = build_doc(&detail);

    match query.format.as_deref() {
        Some("text") => {
            let body = PraktikoTextTemplate { doc }.render()?;
            Ok(HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(body))
        }
        _ => {
            let body = PraktikoHtmlTemplate { doc }.render()?;
            Ok(HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .body(body))
        }
    }
}

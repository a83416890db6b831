use actix_session::Session;
use actix_web::{HttpResponse, web};
use sqlx::SqlitePool;

use crate::auth::session::require_role;
use crate::errors::AppError;
use crate::models::roster::{self, ImportPayload};
use crate::models::stats;
use crate::models::thesis;
use crate::models::user::Role;

/// POST /api/admin/import — secretariat bulk-imports student and
/// professor accounts.
pub async fn import(
    pool: web::Data<SqlitePool>,
    session: Session,
    payload: web::Json<ImportPayload>,
) -> Result<HttpResponse, AppError> {
    require_role(&session, Role::Secretariat)?;

    let result = roster::import_roster(&pool, &payload).await?;
    log::info!(
        "Roster import: created={}, skipped={}, errors={}",
        result.created,
        result.skipped,
        result.errors.len()
    );
    Ok(HttpResponse::Ok().json(result))
}

/// GET /api/admin/export — both rosters, without password hashes.
pub async fn export(
    pool: web::Data<SqlitePool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_role(&session, Role::Secretariat)?;

    let payload = roster::export_roster(&pool).await?;
    Ok(HttpResponse::Ok().json(payload))
}

/// GET /api/admin/theses — management list of theses in progress.
pub async fn theses_in_progress(
    pool: web::Data<SqlitePool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_role(&session, Role::Secretariat)?;

    let items = thesis::find_in_progress(&pool).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/admin/statistics — department-wide aggregates.
pub async fn statistics(
    pool: web::Data<SqlitePool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    require_role(&session, Role::Secretariat)?;

    let stats = stats::secretariat_stats(&pool).await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// GET /api/statistics — the logged-in professor's supervision and
/// committee aggregates.
pub async fn professor_statistics(
    pool: web::Data<SqlitePool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let professor_id = require_role(&session, Role::Professor)?;

    let stats = stats::professor_stats(&pool, professor_id).await?;
    Ok(HttpResponse::Ok().json(stats))
}

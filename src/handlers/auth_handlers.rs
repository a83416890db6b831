use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use sqlx::SqlitePool;

use crate::auth::rate_limit::RateLimiter;
use crate::auth::session::{get_name, get_role, get_user_id};
use crate::auth::password;
use crate::errors::AppError;
use crate::models::user::{self, Identity};

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// POST /api/login — validate credentials against the three account
/// tables and store the identity claims in the session cookie.
pub async fn login(
    req: HttpRequest,
    pool: web::Data<SqlitePool>,
    session: Session,
    form: web::Json<LoginForm>,
    limiter: web::Data<RateLimiter>,
) -> Result<HttpResponse, AppError> {
    // Rate-limit check BEFORE any database access
    let ip = req
        .peer_addr()
        .map(|addr| addr.ip())
        .unwrap_or_else(|| std::net::IpAddr::V4(std::net::Ipv4Addr::UNSPECIFIED));

    if limiter.is_blocked(ip) {
        return Ok(HttpResponse::TooManyRequests().json(json!({
            "error": "Πολλές αποτυχημένες προσπάθειες σύνδεσης. Δοκιμάστε ξανά αργότερα."
        })));
    }

    let found = user::find_by_username(&pool, &form.username).await?;

    if let Some((role, creds)) = found {
        if password::verify_password(&form.password, &creds.password).unwrap_or(false) {
            limiter.clear(ip);

            let _ = session.insert("user_id", creds.id);
            let _ = session.insert("name", &creds.name);
            let _ = session.insert("role", role.as_str());

            return Ok(HttpResponse::Ok().json(Identity {
                id: creds.id,
                name: creds.name,
                role,
            }));
        }
    }

    limiter.record_failure(ip);
    Ok(HttpResponse::Unauthorized().json(json!({ "error": "Μη έγκυρα στοιχεία σύνδεσης" })))
}

/// GET /api/me — echo the session identity claims.
pub async fn me(session: Session) -> Result<HttpResponse, AppError> {
    let id = get_user_id(&session)
        .ok_or_else(|| AppError::Session("No user in session".to_string()))?;
    let name = get_name(&session)
        .ok_or_else(|| AppError::Session("No name in session".to_string()))?;
    let role = get_role(&session)
        .ok_or_else(|| AppError::Session("No role in session".to_string()))?;

    Ok(HttpResponse::Ok().json(Identity { id, name, role }))
}

/// POST /api/logout
pub async fn logout(session: Session) -> Result<HttpResponse, AppError> {
    session.purge();
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}

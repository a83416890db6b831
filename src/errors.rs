use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use std::fmt;

/// Application error surfaced to API clients as a JSON body with a
/// Greek-language `error` message.
#[derive(Debug)]
pub enum AppError {
    Db(sqlx::Error),
    Template(askama::Error),
    Xml(String),
    Hash(String),
    Session(String),
    Validation(String),
    Conflict(String),
    Forbidden(String),
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Template(e) => write!(f, "Template error: {e}"),
            AppError::Xml(e) => write!(f, "XML error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::Session(e) => write!(f, "Session error: {e}"),
            AppError::Validation(e) => write!(f, "Validation error: {e}"),
            AppError::Conflict(e) => write!(f, "Conflict: {e}"),
            AppError::Forbidden(e) => write!(f, "Forbidden: {e}"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::NotFound => {
                HttpResponse::NotFound().json(json!({ "error": "Δεν βρέθηκε" }))
            }
            AppError::Forbidden(msg) => {
                HttpResponse::Forbidden().json(json!({ "error": msg }))
            }
            AppError::Conflict(msg) => {
                HttpResponse::Conflict().json(json!({ "error": msg }))
            }
            AppError::Validation(msg) => {
                HttpResponse::BadRequest().json(json!({ "error": msg }))
            }
            AppError::Session(_) => {
                HttpResponse::Unauthorized().json(json!({ "error": "Απαιτείται σύνδεση" }))
            }
            // Unexpected failures return 500 with the raw driver message attached.
            other => {
                log::error!("{other}");
                HttpResponse::InternalServerError()
                    .json(json!({ "error": format!("Σφάλμα διακομιστή: {other}") }))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        AppError::Template(e)
    }
}

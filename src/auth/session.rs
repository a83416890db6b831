use actix_session::Session;

use crate::errors::AppError;
use crate::models::user::Role;

pub fn get_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>("user_id").unwrap_or(None)
}

pub fn get_name(session: &Session) -> Option<String> {
    session.get::<String>("name").unwrap_or(None)
}

pub fn get_role(session: &Session) -> Option<Role> {
    session
        .get::<String>("role")
        .unwrap_or(None)
        .and_then(|s| Role::parse(&s))
}

/// Current user id + role; 401 if the session carries no identity.
pub fn require_login(session: &Session) -> Result<(i64, Role), AppError> {
    let user_id = get_user_id(session)
        .ok_or_else(|| AppError::Session("No user in session".to_string()))?;
    let role = get_role(session)
        .ok_or_else(|| AppError::Session("No role in session".to_string()))?;
    Ok((user_id, role))
}

/// Check the session carries the given role; returns the user id if so.
pub fn require_role(session: &Session, role: Role) -> Result<i64, AppError> {
    let (user_id, actual) = require_login(session)?;
    if actual == role {
        Ok(user_id)
    } else {
        Err(AppError::Forbidden(
            "Δεν έχετε δικαίωμα για αυτή την ενέργεια".to_string(),
        ))
    }
}

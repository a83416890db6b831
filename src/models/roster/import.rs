use rand::RngCore;
use sqlx::SqlitePool;

use super::types::*;
use crate::auth::password;
use crate::errors::AppError;
use crate::models::user::{self, NewProfessor, NewStudent};

fn generate_password() -> String {
    let mut bytes = [0u8; 8];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Bulk-import students and professors. Existing usernames are skipped,
/// malformed entries are collected as per-item errors, everything else is
/// created with a hashed (given or generated) initial password.
pub async fn import_roster(
    pool: &SqlitePool,
    payload: &ImportPayload,
) -> Result<ImportResult, AppError> {
    let mut result = ImportResult::default();

    for item in &payload.students {
        if item.student_number.is_empty() || item.username.is_empty() || item.name.is_empty() {
            result.errors.push(ImportError {
                item: serde_json::json!({ "username": item.username, "name": item.name }),
                reason: "Λείπουν υποχρεωτικά πεδία (αριθμός μητρώου, όνομα χρήστη, ονοματεπώνυμο)"
                    .to_string(),
            });
            continue;
        }
        if user::username_exists(pool, &item.username).await? {
            result.skipped += 1;
            continue;
        }

        let cleartext = match &item.password {
            Some(p) if !p.is_empty() => p.clone(),
            _ => {
                let generated = generate_password();
                result.generated_passwords.push(GeneratedPassword {
                    username: item.username.clone(),
                    password: generated.clone(),
                });
                generated
            }
        };
        let hash = password::hash_password(&cleartext).map_err(AppError::Hash)?;

        let new = NewStudent {
            student_number: item.student_number.clone(),
            username: item.username.clone(),
            password: hash,
            name: item.name.clone(),
            email: item.email.clone(),
        };
        match user::create_student(pool, &new).await {
            Ok(_) => result.created += 1,
            Err(e) => result.errors.push(ImportError {
                item: serde_json::json!({ "username": item.username }),
                reason: e.to_string(),
            }),
        }
    }

    for item in &payload.professors {
        if item.username.is_empty() || item.name.is_empty() {
            result.errors.push(ImportError {
                item: serde_json::json!({ "username": item.username, "name": item.name }),
                reason: "Λείπουν υποχρεωτικά πεδία (όνομα χρήστη, ονοματεπώνυμο)".to_string(),
            });
            continue;
        }
        if user::username_exists(pool, &item.username).await? {
            result.skipped += 1;
            continue;
        }

        let cleartext = match &item.password {
            Some(p) if !p.is_empty() => p.clone(),
            _ => {
                let generated = generate_password();
                result.generated_passwords.push(GeneratedPassword {
                    username: item.username.clone(),
                    password: generated.clone(),
                });
                generated
            }
        };
        let hash = password::hash_password(&cleartext).map_err(AppError::Hash)?;

        let new = NewProfessor {
            username: item.username.clone(),
            password: hash,
            name: item.name.clone(),
            email: item.email.clone(),
            department: item.department.clone(),
        };
        match user::create_professor(pool, &new).await {
            Ok(_) => result.created += 1,
            Err(e) => result.errors.push(ImportError {
                item: serde_json::json!({ "username": item.username }),
                reason: e.to_string(),
            }),
        }
    }

    Ok(result)
}

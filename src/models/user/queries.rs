use sqlx::SqlitePool;

use super::types::*;
use crate::errors::AppError;

/// Look up credentials for a username across the three account tables,
/// in the order students, professors, secretariat.
pub async fn find_by_username(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<(Role, Credentials)>, AppError> {
    for (role, table) in [
        (Role::Student, "students"),
        (Role::Professor, "professors"),
        (Role::Secretariat, "secretariat"),
    ] {
        let sql = format!("SELECT id, username, password, name FROM {table} WHERE username = ?1");
        let found = sqlx::query_as::<_, Credentials>(&sql)
            .bind(username)
            .fetch_optional(pool)
            .await?;
        if let Some(creds) = found {
            return Ok(Some((role, creds)));
        }
    }
    Ok(None)
}

pub async fn username_exists(pool: &SqlitePool, username: &str) -> Result<bool, AppError> {
    Ok(find_by_username(pool, username).await?.is_some())
}

pub async fn create_student(pool: &SqlitePool, new: &NewStudent) -> Result<i64, AppError> {
    let result = sqlx::query(
        "INSERT INTO students (student_number, username, password, name, email) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&new.student_number)
    .bind(&new.username)
    .bind(&new.password)
    .bind(&new.name)
    .bind(&new.email)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn create_professor(pool: &SqlitePool, new: &NewProfessor) -> Result<i64, AppError> {
    let result = sqlx::query(
        "INSERT INTO professors (username, password, name, email, department) \
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(&new.username)
    .bind(&new.password)
    .bind(&new.name)
    .bind(&new.email)
    .bind(&new.department)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_student_by_id(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<StudentDisplay>, AppError> {
    let row = sqlx::query_as::<_, StudentDisplay>(
        "SELECT id, student_number, username, name, email FROM students WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn find_professor_by_id(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<ProfessorDisplay>, AppError> {
    let row = sqlx::query_as::<_, ProfessorDisplay>(
        "SELECT id, username, name, email, department FROM professors WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

pub async fn list_students(pool: &SqlitePool) -> Result<Vec<StudentDisplay>, AppError> {
    let rows = sqlx::query_as::<_, StudentDisplay>(
        "SELECT id, student_number, username, name, email FROM students ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn list_professors(pool: &SqlitePool) -> Result<Vec<ProfessorDisplay>, AppError> {
    let rows = sqlx::query_as::<_, ProfessorDisplay>(
        "SELECT id, username, name, email, department FROM professors ORDER BY name",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

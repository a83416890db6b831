use serde::{Deserialize, Serialize};

use crate::models::user::{ProfessorDisplay, StudentDisplay};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPayload {
    #[serde(default)]
    pub students: Vec<StudentImport>,
    #[serde(default)]
    pub professors: Vec<ProfessorImport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentImport {
    pub student_number: String,
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Cleartext initial password; a random one is generated when absent.
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessorImport {
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ImportResult {
    pub created: usize,
    pub skipped: usize,
    pub errors: Vec<ImportError>,
    /// Initial passwords generated for accounts imported without one.
    pub generated_passwords: Vec<GeneratedPassword>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportError {
    pub item: serde_json::Value,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPassword {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportPayload {
    pub students: Vec<StudentDisplay>,
    pub professors: Vec<ProfessorDisplay>,
}

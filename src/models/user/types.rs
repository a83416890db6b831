use serde::{Deserialize, Serialize};

/// Account role; each role lives in its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Professor,
    Secretariat,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Professor => "professor",
            Role::Secretariat => "secretariat",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "student" => Some(Role::Student),
            "professor" => Some(Role::Professor),
            "secretariat" => Some(Role::Secretariat),
            _ => None,
        }
    }
}

/// Credential row shared by the three account tables.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Credentials {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub name: String,
}

/// Identity claims stored in the session and echoed by /api/me.
#[derive(Debug, Clone, Serialize)]
pub struct Identity {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StudentDisplay {
    pub id: i64,
    pub student_number: String,
    pub username: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProfessorDisplay {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub email: String,
    pub department: String,
}

pub struct NewStudent {
    pub student_number: String,
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

pub struct NewProfessor {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub department: String,
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct GradeView {
    pub professor_id: i64,
    pub professor_name: String,
    pub grade: f64,
    pub criteria: String,
    pub graded_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewGrade {
    pub grade: f64,
    #[serde(default)]
    pub criteria: String,
}

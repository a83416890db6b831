use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TopicRow {
    pub id: i64,
    pub professor_id: i64,
    pub title: String,
    pub summary: String,
    pub pdf_path: Option<String>,
    pub created_at: String,
}

/// Topic as listed to its owning professor, with assignment state if any.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TopicListItem {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub pdf_path: Option<String>,
    pub created_at: String,
    pub thesis_id: Option<i64>,
    pub thesis_status: Option<String>,
    pub student_name: Option<String>,
}

/// Topic as listed to students browsing available subjects.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AvailableTopic {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub pdf_path: Option<String>,
    pub professor_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTopic {
    pub title: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopicUpdate {
    pub title: Option<String>,
    pub summary: Option<String>,
}

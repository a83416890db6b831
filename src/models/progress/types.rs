use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Draft {
    pub thesis_id: i64,
    pub file_path: String,
    pub external_links: String,
    pub uploaded_at: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Presentation {
    pub thesis_id: i64,
    pub scheduled_at: String,
    pub mode: String,
    pub venue: String,
    pub announced_at: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct LibrarySubmission {
    pub thesis_id: i64,
    pub repository_link: String,
    pub submitted_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DraftLinksForm {
    pub external_links: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresentationForm {
    pub scheduled_at: String,
    pub mode: String,
    pub venue: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryForm {
    pub repository_link: String,
}

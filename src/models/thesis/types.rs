use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::committee::MemberView;
use crate::models::grading::GradeView;
use crate::models::progress::{Draft, LibrarySubmission, Presentation};

/// Lifecycle status of a thesis, stored as TEXT in the theses table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThesisStatus {
    UnderAssignment,
    Active,
    UnderExamination,
    Completed,
    Cancelled,
}

impl ThesisStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThesisStatus::UnderAssignment => "under_assignment",
            ThesisStatus::Active => "active",
            ThesisStatus::UnderExamination => "under_examination",
            ThesisStatus::Completed => "completed",
            ThesisStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<ThesisStatus> {
        match s {
            "under_assignment" => Some(ThesisStatus::UnderAssignment),
            "active" => Some(ThesisStatus::Active),
            "under_examination" => Some(ThesisStatus::UnderExamination),
            "completed" => Some(ThesisStatus::Completed),
            "cancelled" => Some(ThesisStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for ThesisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ThesisRow {
    pub id: i64,
    pub topic_id: i64,
    pub student_id: i64,
    pub supervisor_id: i64,
    pub status: String,
    pub assigned_at: String,
    pub official_assigned_at: Option<String>,
    pub completed_at: Option<String>,
    pub gs_number: Option<String>,
    pub gs_year: Option<String>,
    pub gs_number_cancellation: Option<String>,
    pub gs_year_cancellation: Option<String>,
    pub cancellation_reason: Option<String>,
    pub final_grade: Option<f64>,
}

impl ThesisRow {
    /// Parsed status; unknown values in the column are a data corruption bug.
    pub fn status(&self) -> Result<ThesisStatus, crate::errors::AppError> {
        ThesisStatus::parse(&self.status).ok_or_else(|| {
            crate::errors::AppError::Validation(format!(
                "Άγνωστη κατάσταση διπλωματικής: {}",
                self.status
            ))
        })
    }
}

/// Full joined view served by /api/thesis-details/{topic_id}.
#[derive(Debug, Clone, Serialize)]
pub struct ThesisDetail {
    pub thesis: ThesisRow,
    pub topic_title: String,
    pub topic_summary: String,
    pub topic_pdf_path: Option<String>,
    pub student_name: String,
    pub student_number: String,
    pub supervisor_name: String,
    pub committee: Vec<MemberView>,
    pub draft: Option<Draft>,
    pub presentation: Option<Presentation>,
    pub grades: Vec<GradeView>,
    pub library: Option<LibrarySubmission>,
}

/// Thesis as listed by /api/theses/mine.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MineItem {
    pub thesis_id: i64,
    pub topic_id: i64,
    pub title: String,
    pub status: String,
    pub student_name: String,
    pub supervisor_name: String,
    pub assigned_at: String,
    /// "student", "supervisor" or "committee" for the requesting user.
    pub participation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GsForm {
    pub gs_number: String,
    pub gs_year: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CancelForm {
    pub gs_number: Option<String>,
    pub gs_year: Option<String>,
    pub reason: Option<String>,
}

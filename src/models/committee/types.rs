use serde::{Deserialize, Serialize};

/// Committee quorum: accepted members needed (besides the supervisor)
/// for the thesis to become active.
pub const QUORUM: i64 = 2;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Invitation {
    pub id: i64,
    pub thesis_id: i64,
    pub professor_id: i64,
    pub sent_at: String,
}

/// Invitation as listed to the invited professor.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct InvitationListItem {
    pub id: i64,
    pub thesis_id: i64,
    pub topic_title: String,
    pub student_name: String,
    pub supervisor_name: String,
    pub sent_at: String,
}

/// A professor's recorded accept/reject response for a thesis committee.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MemberView {
    pub professor_id: i64,
    pub name: String,
    pub response: String,
    pub responded_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InviteForm {
    pub professor_id: i64,
}

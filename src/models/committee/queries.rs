use sqlx::SqlitePool;

use super::types::*;
use crate::errors::AppError;
use crate::models::thesis::{ThesisStatus, lifecycle};

/// Invite a professor to the thesis committee.
///
/// The supervisor participates implicitly and cannot be invited; a
/// professor who has already been invited or already responded is a
/// conflict.
pub async fn invite(
    pool: &SqlitePool,
    thesis_id: i64,
    supervisor_id: i64,
    professor_id: i64,
    sent_at: &str,
) -> Result<i64, AppError> {
    if professor_id == supervisor_id {
        return Err(AppError::Validation(
            "Ο επιβλέπων συμμετέχει αυτοδίκαια στην επιτροπή".to_string(),
        ));
    }

    let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM professors WHERE id = ?1")
        .bind(professor_id)
        .fetch_one(pool)
        .await?;
    if exists == 0 {
        return Err(AppError::NotFound);
    }

    let pending: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM invitations WHERE thesis_id = ?1 AND professor_id = ?2",
    )
    .bind(thesis_id)
    .bind(professor_id)
    .fetch_one(pool)
    .await?;
    if pending > 0 {
        return Err(AppError::Conflict("Η πρόσκληση έχει ήδη σταλεί".to_string()));
    }

    let responded: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM committee_members WHERE thesis_id = ?1 AND professor_id = ?2",
    )
    .bind(thesis_id)
    .bind(professor_id)
    .fetch_one(pool)
    .await?;
    if responded > 0 {
        return Err(AppError::Conflict(
            "Ο διδάσκων έχει ήδη απαντήσει για τη συγκεκριμένη διπλωματική".to_string(),
        ));
    }

    let result = sqlx::query(
        "INSERT INTO invitations (thesis_id, professor_id, sent_at) VALUES (?1, ?2, ?3)",
    )
    .bind(thesis_id)
    .bind(professor_id)
    .bind(sent_at)
    .execute(pool)
    .await?;
    Ok(result.last_insert_rowid())
}

pub async fn find_invitation(pool: &SqlitePool, id: i64) -> Result<Option<Invitation>, AppError> {
    let row = sqlx::query_as::<_, Invitation>(
        "SELECT id, thesis_id, professor_id, sent_at FROM invitations WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Pending invitations for a professor, joined with thesis context.
pub async fn find_pending_for_professor(
    pool: &SqlitePool,
    professor_id: i64,
) -> Result<Vec<InvitationListItem>, AppError> {
    let rows = sqlx::query_as::<_, InvitationListItem>(
        "SELECT i.id, i.thesis_id, t.title AS topic_title, \
                s.name AS student_name, p.name AS supervisor_name, i.sent_at \
         FROM invitations i \
         JOIN theses th ON th.id = i.thesis_id \
         JOIN topics t ON t.id = th.topic_id \
         JOIN students s ON s.id = th.student_id \
         JOIN professors p ON p.id = th.supervisor_id \
         WHERE i.professor_id = ?1 \
         ORDER BY i.sent_at DESC",
    )
    .bind(professor_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Resolve an invitation: copy it into committee_members with the given
/// response, delete it, and — on the acceptance that reaches quorum —
/// purge the thesis's remaining invitations and activate it.
///
/// Returns the thesis status after the response. The whole sequence runs
/// in one transaction.
pub async fn respond(
    pool: &SqlitePool,
    invitation_id: i64,
    professor_id: i64,
    accept: bool,
    responded_at: &str,
) -> Result<ThesisStatus, AppError> {
    let mut tx = pool.begin().await?;

    let invitation = sqlx::query_as::<_, Invitation>(
        "SELECT id, thesis_id, professor_id, sent_at FROM invitations WHERE id = ?1",
    )
    .bind(invitation_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound)?;

    if invitation.professor_id != professor_id {
        return Err(AppError::Forbidden(
            "Η πρόσκληση δεν απευθύνεται σε εσάς".to_string(),
        ));
    }

    let status: String = sqlx::query_scalar("SELECT status FROM theses WHERE id = ?1")
        .bind(invitation.thesis_id)
        .fetch_one(&mut *tx)
        .await?;
    let status = ThesisStatus::parse(&status)
        .ok_or_else(|| AppError::Validation(format!("Άγνωστη κατάσταση διπλωματικής: {status}")))?;
    if status != ThesisStatus::UnderAssignment {
        return Err(AppError::Conflict(
            "Η τριμελής επιτροπή έχει ήδη συμπληρωθεί".to_string(),
        ));
    }

    let response = if accept { "accepted" } else { "rejected" };
    sqlx::query(
        "INSERT INTO committee_members (thesis_id, professor_id, response, responded_at) \
         VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(invitation.thesis_id)
    .bind(professor_id)
    .bind(response)
    .bind(responded_at)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM invitations WHERE id = ?1")
        .bind(invitation_id)
        .execute(&mut *tx)
        .await?;

    let mut new_status = status;
    if accept {
        let accepted: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM committee_members \
             WHERE thesis_id = ?1 AND response = 'accepted'",
        )
        .bind(invitation.thesis_id)
        .fetch_one(&mut *tx)
        .await?;

        if accepted >= QUORUM {
            lifecycle::validate_transition(status, ThesisStatus::Active)?;

            sqlx::query("DELETE FROM invitations WHERE thesis_id = ?1")
                .bind(invitation.thesis_id)
                .execute(&mut *tx)
                .await?;
            sqlx::query("UPDATE theses SET status = 'active' WHERE id = ?1")
                .bind(invitation.thesis_id)
                .execute(&mut *tx)
                .await?;
            new_status = ThesisStatus::Active;
        }
    }

    tx.commit().await?;
    Ok(new_status)
}

pub async fn find_members(pool: &SqlitePool, thesis_id: i64) -> Result<Vec<MemberView>, AppError> {
    let rows = sqlx::query_as::<_, MemberView>(
        "SELECT cm.professor_id, p.name, cm.response, cm.responded_at \
         FROM committee_members cm \
         JOIN professors p ON p.id = cm.professor_id \
         WHERE cm.thesis_id = ?1 \
         ORDER BY cm.responded_at",
    )
    .bind(thesis_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count_accepted(pool: &SqlitePool, thesis_id: i64) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM committee_members WHERE thesis_id = ?1 AND response = 'accepted'",
    )
    .bind(thesis_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

pub async fn count_pending(pool: &SqlitePool, thesis_id: i64) -> Result<i64, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invitations WHERE thesis_id = ?1")
        .bind(thesis_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// True if the professor is an accepted committee member of the thesis.
pub async fn is_accepted_member(
    pool: &SqlitePool,
    thesis_id: i64,
    professor_id: i64,
) -> Result<bool, AppError> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM committee_members \
         WHERE thesis_id = ?1 AND professor_id = ?2 AND response = 'accepted'",
    )
    .bind(thesis_id)
    .bind(professor_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

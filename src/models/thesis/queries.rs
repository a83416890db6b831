use sqlx::SqlitePool;

use super::lifecycle;
use super::types::*;
use crate::errors::AppError;
use crate::models::{committee, grading, progress};

const THESIS_COLUMNS: &str = "id, topic_id, student_id, supervisor_id, status, assigned_at, \
     official_assigned_at, completed_at, gs_number, gs_year, \
     gs_number_cancellation, gs_year_cancellation, cancellation_reason, final_grade";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<ThesisRow>, AppError> {
    let sql = format!("SELECT {THESIS_COLUMNS} FROM theses WHERE id = ?1");
    let row = sqlx::query_as::<_, ThesisRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_topic(pool: &SqlitePool, topic_id: i64) -> Result<Option<ThesisRow>, AppError> {
    let sql = format!(
        "SELECT {THESIS_COLUMNS} FROM theses WHERE topic_id = ?1 AND status != 'cancelled'"
    );
    let row = sqlx::query_as::<_, ThesisRow>(&sql)
        .bind(topic_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Assign a topic to a student, creating the thesis in `under_assignment`.
///
/// Runs the check-then-insert sequence in one transaction: the student
/// must hold no other non-cancelled thesis and the topic must be free.
pub async fn assign(
    pool: &SqlitePool,
    topic_id: i64,
    student_id: i64,
    supervisor_id: i64,
    assigned_at: &str,
) -> Result<i64, AppError> {
    let mut tx = pool.begin().await?;

    let existing: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM theses WHERE student_id = ?1 AND status != 'cancelled'",
    )
    .bind(student_id)
    .fetch_one(&mut *tx)
    .await?;
    if existing > 0 {
        return Err(AppError::Conflict(
            "Ο φοιτητής έχει ήδη διπλωματική εργασία σε εξέλιξη".to_string(),
        ));
    }

    let taken: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM theses WHERE topic_id = ?1 AND status != 'cancelled'",
    )
    .bind(topic_id)
    .fetch_one(&mut *tx)
    .await?;
    if taken > 0 {
        return Err(AppError::Conflict("Το θέμα έχει ήδη ανατεθεί".to_string()));
    }

    let result = sqlx::query(
        "INSERT INTO theses (topic_id, student_id, supervisor_id, status, assigned_at) \
         VALUES (?1, ?2, ?3, 'under_assignment', ?4)",
    )
    .bind(topic_id)
    .bind(student_id)
    .bind(supervisor_id)
    .bind(assigned_at)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(result.last_insert_rowid())
}

/// Undo an assignment still in `under_assignment`: the thesis row and its
/// invitations/committee responses disappear and the topic returns to the
/// available pool. Cascades handle the dependent rows.
pub async fn unassign(pool: &SqlitePool, thesis_id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM theses WHERE id = ?1")
        .bind(thesis_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_status(
    pool: &SqlitePool,
    thesis_id: i64,
    status: ThesisStatus,
) -> Result<(), AppError> {
    sqlx::query("UPDATE theses SET status = ?1 WHERE id = ?2")
        .bind(status.as_str())
        .bind(thesis_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Record the GS assignment reference. The first write stamps the
/// official assignment date, which starts the supervisor's tenure clock;
/// later writes may correct the reference while the thesis is still
/// active or under examination.
pub async fn set_gs_reference(
    pool: &SqlitePool,
    thesis_id: i64,
    gs_number: &str,
    gs_year: &str,
    today: &str,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let status: String = sqlx::query_scalar("SELECT status FROM theses WHERE id = ?1")
        .bind(thesis_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound)?;
    let status = ThesisStatus::parse(&status)
        .ok_or_else(|| AppError::Validation(format!("Άγνωστη κατάσταση διπλωματικής: {status}")))?;
    if status != ThesisStatus::Active && status != ThesisStatus::UnderExamination {
        return Err(AppError::Conflict(
            "Η αναφορά ΓΣ καταχωρείται μόνο για ενεργή ή υπό εξέταση διπλωματική".to_string(),
        ));
    }

    sqlx::query(
        "UPDATE theses SET gs_number = ?1, gs_year = ?2, \
                official_assigned_at = COALESCE(official_assigned_at, ?3) \
         WHERE id = ?4",
    )
    .bind(gs_number)
    .bind(gs_year)
    .bind(today)
    .bind(thesis_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

pub async fn cancel(
    pool: &SqlitePool,
    thesis_id: i64,
    reason: &str,
    gs_number: Option<&str>,
    gs_year: Option<&str>,
) -> Result<(), AppError> {
    sqlx::query(
        "UPDATE theses SET status = 'cancelled', cancellation_reason = ?1, \
                gs_number_cancellation = ?2, gs_year_cancellation = ?3 \
         WHERE id = ?4",
    )
    .bind(reason)
    .bind(gs_number)
    .bind(gs_year)
    .bind(thesis_id)
    .execute(pool)
    .await?;
    Ok(())
}

/// Complete a thesis under examination.
///
/// Transactional: requires at least one submitted grade and a stored
/// library repository link, then records the two-decimal mean as the
/// final grade.
pub async fn complete(
    pool: &SqlitePool,
    thesis_id: i64,
    completed_at: &str,
) -> Result<f64, AppError> {
    let mut tx = pool.begin().await?;

    let grade_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM grades WHERE thesis_id = ?1")
        .bind(thesis_id)
        .fetch_one(&mut *tx)
        .await?;
    if grade_count == 0 {
        return Err(AppError::Conflict(
            "Δεν έχουν υποβληθεί βαθμοί για τη διπλωματική".to_string(),
        ));
    }

    let has_library: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM library_submissions WHERE thesis_id = ?1",
    )
    .bind(thesis_id)
    .fetch_one(&mut *tx)
    .await?;
    if has_library == 0 {
        return Err(AppError::Conflict(
            "Δεν έχει κατατεθεί σύνδεσμος αποθετηρίου στη βιβλιοθήκη".to_string(),
        ));
    }

    let mean: f64 = sqlx::query_scalar("SELECT AVG(grade) FROM grades WHERE thesis_id = ?1")
        .bind(thesis_id)
        .fetch_one(&mut *tx)
        .await?;
    let final_grade = lifecycle::round_final_grade(mean);

    sqlx::query(
        "UPDATE theses SET status = 'completed', final_grade = ?1, completed_at = ?2 \
         WHERE id = ?3",
    )
    .bind(final_grade)
    .bind(completed_at)
    .bind(thesis_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(final_grade)
}

/// Theses where the student is the assignee.
pub async fn find_mine_student(
    pool: &SqlitePool,
    student_id: i64,
) -> Result<Vec<MineItem>, AppError> {
    let rows = sqlx::query_as::<_, MineItem>(
        "SELECT th.id AS thesis_id, th.topic_id, t.title, th.status, \
                s.name AS student_name, p.name AS supervisor_name, th.assigned_at, \
                'student' AS participation \
         FROM theses th \
         JOIN topics t ON t.id = th.topic_id \
         JOIN students s ON s.id = th.student_id \
         JOIN professors p ON p.id = th.supervisor_id \
         WHERE th.student_id = ?1 \
         ORDER BY th.assigned_at DESC",
    )
    .bind(student_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Theses where the professor supervises or sits on the committee.
pub async fn find_mine_professor(
    pool: &SqlitePool,
    professor_id: i64,
) -> Result<Vec<MineItem>, AppError> {
    let rows = sqlx::query_as::<_, MineItem>(
        "SELECT th.id AS thesis_id, th.topic_id, t.title, th.status, \
                s.name AS student_name, p.name AS supervisor_name, th.assigned_at, \
                CASE WHEN th.supervisor_id = ?1 THEN 'supervisor' ELSE 'committee' END \
                    AS participation \
         FROM theses th \
         JOIN topics t ON t.id = th.topic_id \
         JOIN students s ON s.id = th.student_id \
         JOIN professors p ON p.id = th.supervisor_id \
         WHERE th.supervisor_id = ?1 \
            OR EXISTS (SELECT 1 FROM committee_members cm \
                       WHERE cm.thesis_id = th.id AND cm.professor_id = ?1 \
                         AND cm.response = 'accepted') \
         ORDER BY th.assigned_at DESC",
    )
    .bind(professor_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Secretariat management list: active and under-examination theses.
pub async fn find_in_progress(pool: &SqlitePool) -> Result<Vec<MineItem>, AppError> {
    let rows = sqlx::query_as::<_, MineItem>(
        "SELECT th.id AS thesis_id, th.topic_id, t.title, th.status, \
                s.name AS student_name, p.name AS supervisor_name, th.assigned_at, \
                'secretariat' AS participation \
         FROM theses th \
         JOIN topics t ON t.id = th.topic_id \
         JOIN students s ON s.id = th.student_id \
         JOIN professors p ON p.id = th.supervisor_id \
         WHERE th.status IN ('active', 'under_examination') \
         ORDER BY th.assigned_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Assemble the full joined detail for a topic's thesis.
pub async fn find_detail_by_topic(
    pool: &SqlitePool,
    topic_id: i64,
) -> Result<Option<ThesisDetail>, AppError> {
    let Some(thesis) = find_by_topic(pool, topic_id).await? else {
        return Ok(None);
    };

    #[derive(sqlx::FromRow)]
    struct Head {
        topic_title: String,
        topic_summary: String,
        topic_pdf_path: Option<String>,
        student_name: String,
        student_number: String,
        supervisor_name: String,
    }

    let head = sqlx::query_as::<_, Head>(
        "SELECT t.title AS topic_title, t.summary AS topic_summary, \
                t.pdf_path AS topic_pdf_path, \
                s.name AS student_name, s.student_number, p.name AS supervisor_name \
         FROM theses th \
         JOIN topics t ON t.id = th.topic_id \
         JOIN students s ON s.id = th.student_id \
         JOIN professors p ON p.id = th.supervisor_id \
         WHERE th.id = ?1",
    )
    .bind(thesis.id)
    .fetch_one(pool)
    .await?;

    let committee = committee::find_members(pool, thesis.id).await?;
    let draft = progress::find_draft(pool, thesis.id).await?;
    let presentation = progress::find_presentation(pool, thesis.id).await?;
    let grades = grading::find_for_thesis(pool, thesis.id).await?;
    let library = progress::find_library(pool, thesis.id).await?;

    Ok(Some(ThesisDetail {
        thesis,
        topic_title: head.topic_title,
        topic_summary: head.topic_summary,
        topic_pdf_path: head.topic_pdf_path,
        student_name: head.student_name,
        student_number: head.student_number,
        supervisor_name: head.supervisor_name,
        committee,
        draft,
        presentation,
        grades,
        library,
    }))
}

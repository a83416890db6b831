use serde::Serialize;
use sqlx::SqlitePool;

use crate::errors::AppError;

/// Public examination announcement, one per scheduled presentation of a
/// thesis under examination.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct AnnouncementItem {
    pub thesis_id: i64,
    pub title: String,
    pub student_name: String,
    pub supervisor_name: String,
    pub scheduled_at: String,
    pub mode: String,
    pub venue: String,
    pub announced_at: String,
}

/// Announcements feed, optionally bounded by ISO dates (inclusive on
/// both ends) on the scheduled presentation day.
pub async fn find_announcements(
    pool: &SqlitePool,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<Vec<AnnouncementItem>, AppError> {
    let mut sql = String::from(
        "SELECT th.id AS thesis_id, t.title, s.name AS student_name, \
                p.name AS supervisor_name, pr.scheduled_at, pr.mode, pr.venue, \
                pr.announced_at \
         FROM presentations pr \
         JOIN theses th ON th.id = pr.thesis_id \
         JOIN topics t ON t.id = th.topic_id \
         JOIN students s ON s.id = th.student_id \
         JOIN professors p ON p.id = th.supervisor_id \
         WHERE th.status = 'under_examination'",
    );
    // Bounds are bare dates; compare on the date part so the `to` day
    // itself stays inside the window.
    if from.is_some() {
        sql.push_str(" AND date(pr.scheduled_at) >= ?1");
    }
    if to.is_some() {
        sql.push_str(if from.is_some() {
            " AND date(pr.scheduled_at) <= ?2"
        } else {
            " AND date(pr.scheduled_at) <= ?1"
        });
    }
    sql.push_str(" ORDER BY pr.scheduled_at");

    let mut query = sqlx::query_as::<_, AnnouncementItem>(&sql);
    if let Some(from) = from {
        query = query.bind(from.to_string());
    }
    if let Some(to) = to {
        query = query.bind(to.to_string());
    }

    let rows = query.fetch_all(pool).await?;
    Ok(rows)
}

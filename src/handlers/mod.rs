pub mod admin_handlers;
pub mod auth_handlers;
pub mod feed_handlers;
pub mod grade_handlers;
pub mod invitation_handlers;
pub mod minutes_handlers;
pub mod progress_handlers;
pub mod thesis_handlers;
pub mod topic_handlers;

/// ISO date for date-valued columns (assignment, completion).
pub(crate) fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// RFC 3339 timestamp for event-valued columns.
pub(crate) fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

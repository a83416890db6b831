//! The thesis lifecycle state machine.
//!
//! Every status write goes through `validate_transition` first, so the
//! set of legal moves lives in exactly one place:
//!
//! under_assignment -> active             (committee quorum reached)
//! active           -> under_examination  (supervisor, draft uploaded)
//! active           -> cancelled          (supervisor two-year rule, or secretariat)
//! under_examination -> completed         (secretariat, grades + library link)

use chrono::{Months, NaiveDate};

use super::types::ThesisStatus;
use crate::errors::AppError;

/// Minimum tenure before a supervisor may cancel, measured from the
/// official (GS-recorded) assignment date.
pub const MIN_TENURE_MONTHS: u32 = 24;

pub fn validate_transition(from: ThesisStatus, to: ThesisStatus) -> Result<(), AppError> {
    use ThesisStatus::*;
    let allowed = matches!(
        (from, to),
        (UnderAssignment, Active)
            | (Active, UnderExamination)
            | (Active, Cancelled)
            | (UnderExamination, Completed)
    );

    if allowed {
        Ok(())
    } else {
        Err(AppError::Conflict(format!(
            "Μη επιτρεπτή μετάβαση από '{from}' σε '{to}'"
        )))
    }
}

/// Two-year rule for supervisor-initiated cancellation.
///
/// `official_assigned_at` is the ISO date stamped when the secretariat
/// records the GS assignment reference; without it the tenure clock has
/// never started.
pub fn check_supervisor_tenure(
    official_assigned_at: Option<&str>,
    today: NaiveDate,
) -> Result<(), AppError> {
    let official = official_assigned_at.ok_or_else(|| {
        AppError::Validation(
            "Δεν έχει καταχωρηθεί επίσημη ανάθεση από τη Γραμματεία".to_string(),
        )
    })?;

    let official = NaiveDate::parse_from_str(official, "%Y-%m-%d").map_err(|_| {
        AppError::Validation(format!("Μη έγκυρη ημερομηνία ανάθεσης: {official}"))
    })?;

    // Two calendar years, not a fixed day count, so leap days don't
    // shift the deadline.
    let deadline = official + Months::new(MIN_TENURE_MONTHS);
    if today < deadline {
        return Err(AppError::Conflict(
            "Δεν έχει συμπληρωθεί διετία από την επίσημη ανάθεση".to_string(),
        ));
    }
    Ok(())
}

/// Round a grade average to two decimals, the precision the final grade
/// is recorded with.
pub fn round_final_grade(mean: f64) -> f64 {
    (mean * 100.0).round() / 100.0
}

mod common;

use chrono::NaiveDate;

use thesisflow::errors::AppError;
use thesisflow::models::thesis::ThesisStatus::*;
use thesisflow::models::thesis::lifecycle::{
    check_supervisor_tenure, round_final_grade, validate_transition,
};

#[test]
fn test_allowed_transitions() {
    assert!(validate_transition(UnderAssignment, Active).is_ok());
    assert!(validate_transition(Active, UnderExamination).is_ok());
    assert!(validate_transition(Active, Cancelled).is_ok());
    assert!(validate_transition(UnderExamination, Completed).is_ok());
}

#[test]
fn test_forbidden_transitions() {
    let cases = [
        (UnderAssignment, UnderExamination),
        (UnderAssignment, Completed),
        (UnderAssignment, Cancelled),
        (Active, Completed),
        (UnderExamination, Active),
        (UnderExamination, Cancelled),
        (Completed, Active),
        (Completed, Cancelled),
        (Cancelled, Active),
    ];
    for (from, to) in cases {
        let err = validate_transition(from, to).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)), "{from} -> {to} should be a conflict");
    }
}

#[test]
fn test_tenure_requires_official_assignment() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let err = check_supervisor_tenure(None, today).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_tenure_rejects_before_two_years() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let err = check_supervisor_tenure(Some("2024-01-15"), today).unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // One day short of the anniversary.
    let err = check_supervisor_tenure(Some("2023-06-02"), today).unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[test]
fn test_tenure_passes_at_two_years() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    // Exactly the second anniversary of the official assignment.
    assert!(check_supervisor_tenure(Some("2023-06-01"), today).is_ok());
    assert!(check_supervisor_tenure(Some("2020-01-01"), today).is_ok());
}

#[test]
fn test_tenure_counts_calendar_years_across_leap_days() {
    // 2024 is a leap year; the window from 2022-06-01 contains 2024-02-29
    // but the deadline is still the plain anniversary, not 730 days.
    let anniversary = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    assert!(check_supervisor_tenure(Some("2022-06-01"), anniversary).is_ok());
    let day_before = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
    let err = check_supervisor_tenure(Some("2022-06-01"), day_before).unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // A leap-day assignment clamps to the end of February.
    let clamped = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
    assert!(check_supervisor_tenure(Some("2024-02-29"), clamped).is_ok());
    let err = check_supervisor_tenure(
        Some("2024-02-29"),
        NaiveDate::from_ymd_opt(2026, 2, 27).unwrap(),
    )
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[test]
fn test_tenure_rejects_garbage_date() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let err = check_supervisor_tenure(Some("15/01/2020"), today).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn test_round_final_grade_two_decimals() {
    assert_eq!(round_final_grade(8.5), 8.5);
    assert_eq!(round_final_grade(8.333333333333334), 8.33);
    assert_eq!(round_final_grade(8.666666666666666), 8.67);
    assert_eq!(round_final_grade(9.996666666666666), 10.0);
    assert_eq!(round_final_grade(0.0), 0.0);
}

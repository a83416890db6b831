mod common;

use thesisflow::errors::AppError;
use thesisflow::models::grading::{self, NewGrade};
use thesisflow::models::thesis::{self, ThesisStatus};

fn grade(value: f64) -> NewGrade {
    NewGrade { grade: value, criteria: "ποιότητα, βιβλιογραφία, παρουσίαση".to_string() }
}

#[tokio::test]
async fn test_grade_must_be_within_range() {
    let pool = common::setup_test_db().await;
    let (thesis_id, _, _, supervisor_id, _, _) = common::active_thesis(&pool, "a").await;

    for bad in [-0.5, 10.01, 42.0] {
        let err = grading::submit(
            &pool, thesis_id, supervisor_id, supervisor_id, &grade(bad), "2025-06-01T10:00:00Z",
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "grade {bad} should be rejected");
    }
}

#[tokio::test]
async fn test_only_committee_participants_grade() {
    let pool = common::setup_test_db().await;
    let (thesis_id, _, _, supervisor_id, _, _) = common::active_thesis(&pool, "a").await;
    let outsider = common::create_professor(&pool, "outsider").await;

    let err = grading::submit(
        &pool, thesis_id, supervisor_id, outsider, &grade(9.0), "2025-06-01T10:00:00Z",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_supervisor_grades_first() {
    let pool = common::setup_test_db().await;
    let (thesis_id, _, _, supervisor_id, member_a, _) = common::active_thesis(&pool, "a").await;

    let err = grading::submit(
        &pool, thesis_id, supervisor_id, member_a, &grade(9.0), "2025-06-01T10:00:00Z",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    grading::submit(
        &pool, thesis_id, supervisor_id, supervisor_id, &grade(8.0), "2025-06-01T11:00:00Z",
    )
    .await
    .unwrap();
    grading::submit(&pool, thesis_id, supervisor_id, member_a, &grade(9.0), "2025-06-01T12:00:00Z")
        .await
        .unwrap();

    assert_eq!(grading::count_for_thesis(&pool, thesis_id).await.unwrap(), 2);
}

#[tokio::test]
async fn test_one_grade_per_professor() {
    let pool = common::setup_test_db().await;
    let (thesis_id, _, _, supervisor_id, _, _) = common::active_thesis(&pool, "a").await;

    grading::submit(
        &pool, thesis_id, supervisor_id, supervisor_id, &grade(8.0), "2025-06-01T10:00:00Z",
    )
    .await
    .unwrap();
    let err = grading::submit(
        &pool, thesis_id, supervisor_id, supervisor_id, &grade(9.0), "2025-06-01T11:00:00Z",
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_grades_listed_with_professor_names() {
    let pool = common::setup_test_db().await;
    let (thesis_id, _, _, supervisor_id, member_a, _) = common::active_thesis(&pool, "a").await;

    grading::submit(
        &pool, thesis_id, supervisor_id, supervisor_id, &grade(7.5), "2025-06-01T10:00:00Z",
    )
    .await
    .unwrap();
    grading::submit(&pool, thesis_id, supervisor_id, member_a, &grade(8.5), "2025-06-01T11:00:00Z")
        .await
        .unwrap();

    let views = grading::find_for_thesis(&pool, thesis_id).await.unwrap();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].professor_id, supervisor_id);
    assert_eq!(views[0].grade, 7.5);
    assert!(views[0].professor_name.starts_with("Prof."));
    assert_eq!(views[1].professor_id, member_a);
}

#[tokio::test]
async fn test_final_grade_is_two_decimal_mean() {
    let pool = common::setup_test_db().await;
    let (thesis_id, _, _, supervisor_id, member_a, _) = common::active_thesis(&pool, "a").await;
    thesis::update_status(&pool, thesis_id, ThesisStatus::UnderExamination).await.unwrap();

    grading::submit(
        &pool, thesis_id, supervisor_id, supervisor_id, &grade(8.0), "2025-06-01T10:00:00Z",
    )
    .await
    .unwrap();
    grading::submit(&pool, thesis_id, supervisor_id, member_a, &grade(9.0), "2025-06-01T11:00:00Z")
        .await
        .unwrap();
    thesisflow::models::progress::upsert_library(
        &pool, thesis_id, "https://repo.example.org/1", "2025-06-20T00:00:00Z",
    )
    .await
    .unwrap();

    let final_grade = thesis::complete(&pool, thesis_id, "2025-07-01").await.unwrap();
    assert_eq!(final_grade, 8.5);
}

#[tokio::test]
async fn test_completion_requires_grades_and_library_link() {
    let pool = common::setup_test_db().await;
    let (thesis_id, _, _, supervisor_id, member_a, member_b) =
        common::active_thesis(&pool, "a").await;
    thesis::update_status(&pool, thesis_id, ThesisStatus::UnderExamination).await.unwrap();

    let err = thesis::complete(&pool, thesis_id, "2025-07-01").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    grading::submit(
        &pool, thesis_id, supervisor_id, supervisor_id, &grade(8.0), "2025-06-01T10:00:00Z",
    )
    .await
    .unwrap();
    grading::submit(&pool, thesis_id, supervisor_id, member_a, &grade(9.0), "2025-06-01T11:00:00Z")
        .await
        .unwrap();
    grading::submit(&pool, thesis_id, supervisor_id, member_b, &grade(9.5), "2025-06-01T12:00:00Z")
        .await
        .unwrap();

    // Grades alone are not enough without the repository link.
    let err = thesis::complete(&pool, thesis_id, "2025-07-01").await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    thesisflow::models::progress::upsert_library(
        &pool, thesis_id, "https://nemertes.library.upatras.gr/item/123", "2025-06-20T00:00:00Z",
    )
    .await
    .unwrap();

    let final_grade = thesis::complete(&pool, thesis_id, "2025-07-01").await.unwrap();
    // mean of 8.0, 9.0, 9.5 rounded to two decimals
    assert_eq!(final_grade, 8.83);

    let row = thesis::find_by_id(&pool, thesis_id).await.unwrap().unwrap();
    assert_eq!(row.status, "completed");
    assert_eq!(row.final_grade, Some(8.83));
    assert_eq!(row.completed_at.as_deref(), Some("2025-07-01"));
}

mod common;

use thesisflow::errors::AppError;
use thesisflow::models::progress::{self, PresentationForm};

#[tokio::test]
async fn test_draft_upsert_replaces_previous_file() {
    let pool = common::setup_test_db().await;
    let (thesis_id, _, _, _, _, _) = common::active_thesis(&pool, "a").await;

    progress::upsert_draft(&pool, thesis_id, "/uploads/draft_1.pdf", "2025-05-01T00:00:00Z")
        .await
        .unwrap();
    progress::upsert_draft(&pool, thesis_id, "/uploads/draft_1.pdf", "2025-05-02T00:00:00Z")
        .await
        .unwrap();

    let draft = progress::find_draft(&pool, thesis_id).await.unwrap().unwrap();
    assert_eq!(draft.uploaded_at, "2025-05-02T00:00:00Z");
    assert_eq!(draft.external_links, "");
}

#[tokio::test]
async fn test_links_require_an_uploaded_draft() {
    let pool = common::setup_test_db().await;
    let (thesis_id, _, _, _, _, _) = common::active_thesis(&pool, "a").await;

    let err = progress::set_draft_links(&pool, thesis_id, "https://youtu.be/abc")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    progress::upsert_draft(&pool, thesis_id, "/uploads/draft_1.pdf", "2025-05-01T00:00:00Z")
        .await
        .unwrap();
    progress::set_draft_links(&pool, thesis_id, "https://youtu.be/abc").await.unwrap();

    let draft = progress::find_draft(&pool, thesis_id).await.unwrap().unwrap();
    assert_eq!(draft.external_links, "https://youtu.be/abc");
}

#[tokio::test]
async fn test_presentation_validates_mode_and_fields() {
    let pool = common::setup_test_db().await;
    let (thesis_id, _, _, _, _, _) = common::active_thesis(&pool, "a").await;

    let bad_mode = PresentationForm {
        scheduled_at: "2025-06-15T12:00:00".to_string(),
        mode: "hybrid".to_string(),
        venue: "Αίθουσα Β3".to_string(),
    };
    let err = progress::upsert_presentation(&pool, thesis_id, &bad_mode, "2025-06-01T00:00:00Z")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let empty_venue = PresentationForm {
        scheduled_at: "2025-06-15T12:00:00".to_string(),
        mode: "in_person".to_string(),
        venue: String::new(),
    };
    let err = progress::upsert_presentation(&pool, thesis_id, &empty_venue, "2025-06-01T00:00:00Z")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_presentation_reschedule_overwrites() {
    let pool = common::setup_test_db().await;
    let (thesis_id, _, _, _, _, _) = common::active_thesis(&pool, "a").await;

    let first = PresentationForm {
        scheduled_at: "2025-06-15T12:00:00".to_string(),
        mode: "in_person".to_string(),
        venue: "Αίθουσα Β3".to_string(),
    };
    progress::upsert_presentation(&pool, thesis_id, &first, "2025-06-01T00:00:00Z")
        .await
        .unwrap();

    let moved = PresentationForm {
        scheduled_at: "2025-06-20T10:00:00".to_string(),
        mode: "online".to_string(),
        venue: "https://meet.example.org/exam".to_string(),
    };
    progress::upsert_presentation(&pool, thesis_id, &moved, "2025-06-02T00:00:00Z")
        .await
        .unwrap();

    let row = progress::find_presentation(&pool, thesis_id).await.unwrap().unwrap();
    assert_eq!(row.scheduled_at, "2025-06-20T10:00:00");
    assert_eq!(row.mode, "online");
}

#[tokio::test]
async fn test_library_link_must_not_be_empty() {
    let pool = common::setup_test_db().await;
    let (thesis_id, _, _, _, _, _) = common::active_thesis(&pool, "a").await;

    let err = progress::upsert_library(&pool, thesis_id, "", "2025-06-20T00:00:00Z")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    progress::upsert_library(
        &pool, thesis_id, "https://nemertes.library.upatras.gr/item/42", "2025-06-20T00:00:00Z",
    )
    .await
    .unwrap();
    let row = progress::find_library(&pool, thesis_id).await.unwrap().unwrap();
    assert_eq!(row.repository_link, "https://nemertes.library.upatras.gr/item/42");
}

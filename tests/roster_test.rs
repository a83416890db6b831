mod common;

use thesisflow::auth::password::verify_password;
use thesisflow::models::roster::{self, ImportPayload, ProfessorImport, StudentImport};
use thesisflow::models::user;

fn student(number: &str, username: &str, password: Option<&str>) -> StudentImport {
    StudentImport {
        student_number: number.to_string(),
        username: username.to_string(),
        name: format!("Imported {username}"),
        email: format!("{username}@uni.test"),
        password: password.map(str::to_string),
    }
}

fn professor(username: &str) -> ProfessorImport {
    ProfessorImport {
        username: username.to_string(),
        name: format!("Imported {username}"),
        email: format!("{username}@uni.test"),
        department: "Informatics".to_string(),
        password: None,
    }
}

#[tokio::test]
async fn test_import_creates_accounts_with_usable_passwords() {
    let pool = common::setup_test_db().await;

    let payload = ImportPayload {
        students: vec![student("1084512", "st1084512", Some("initial-pass"))],
        professors: vec![professor("pr_new")],
    };
    let result = roster::import_roster(&pool, &payload).await.unwrap();

    assert_eq!(result.created, 2);
    assert_eq!(result.skipped, 0);
    assert!(result.errors.is_empty());

    // Only the professor got a generated password.
    assert_eq!(result.generated_passwords.len(), 1);
    assert_eq!(result.generated_passwords[0].username, "pr_new");
    assert_eq!(result.generated_passwords[0].password.len(), 16);

    let (_, creds) = user::find_by_username(&pool, "st1084512").await.unwrap().unwrap();
    assert!(verify_password("initial-pass", &creds.password).unwrap());

    let (_, creds) = user::find_by_username(&pool, "pr_new").await.unwrap().unwrap();
    assert!(verify_password(&result.generated_passwords[0].password, &creds.password).unwrap());
}

#[tokio::test]
async fn test_import_skips_existing_usernames() {
    let pool = common::setup_test_db().await;
    common::create_student(&pool, "taken").await;

    let payload = ImportPayload {
        students: vec![
            student("1084512", "taken", None),
            student("1084513", "fresh", None),
        ],
        professors: vec![],
    };
    let result = roster::import_roster(&pool, &payload).await.unwrap();

    assert_eq!(result.created, 1);
    assert_eq!(result.skipped, 1);
    assert!(user::username_exists(&pool, "fresh").await.unwrap());
}

#[tokio::test]
async fn test_import_reports_malformed_items() {
    let pool = common::setup_test_db().await;

    let payload = ImportPayload {
        students: vec![student("", "no_number", None)],
        professors: vec![ProfessorImport {
            username: String::new(),
            name: "No Username".to_string(),
            email: String::new(),
            department: String::new(),
            password: None,
        }],
    };
    let result = roster::import_roster(&pool, &payload).await.unwrap();

    assert_eq!(result.created, 0);
    assert_eq!(result.errors.len(), 2);
    assert!(result.errors[0].reason.contains("υποχρεωτικά πεδία"));
}

#[tokio::test]
async fn test_export_lists_rosters_without_hashes() {
    let pool = common::setup_test_db().await;
    common::create_student(&pool, "alice").await;
    common::create_professor(&pool, "bob").await;
    common::create_professor(&pool, "carol").await;

    let payload = roster::export_roster(&pool).await.unwrap();
    assert_eq!(payload.students.len(), 1);
    assert_eq!(payload.professors.len(), 2);
    assert_eq!(payload.students[0].username, "alice");

    let json = serde_json::to_string(&payload).unwrap();
    assert!(!json.contains("password"));
    assert!(!json.contains("$argon2"));
}

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use thesisflow::auth::{self, rate_limit::RateLimiter};
use thesisflow::db;
use thesisflow::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    // Ensure data directories exist
    std::fs::create_dir_all(handlers::topic_handlers::UPLOAD_DIR)
        .expect("Failed to create upload directory");

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/app.db".to_string());

    // Initialize database
    let pool = db::init_pool(&database_url)
        .await
        .expect("Failed to create DB pool");
    db::run_migrations(&pool).await.expect("Failed to run migrations");

    // Seed the default secretariat account if the database is empty
    let seed_hash = auth::password::hash_password("secretariat123")
        .expect("Failed to hash default password");
    db::seed_accounts(&pool, &seed_hash)
        .await
        .expect("Failed to seed accounts");

    // Session encryption key — load from SESSION_KEY env var for persistent sessions across restarts
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!(
                "SESSION_KEY too short ({} bytes, need 64+) — generating random key",
                val.len()
            );
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set — generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let limiter = RateLimiter::new();

    log::info!("Starting server at http://127.0.0.1:8080");

    HttpServer::new(move || {
        let session_mw =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_secure(false)
                .cookie_http_only(true)
                .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(limiter.clone()))
            // Uploaded files (topic PDFs, drafts)
            .service(actix_files::Files::new("/uploads", handlers::topic_handlers::UPLOAD_DIR))
            // Public routes
            .route("/api/login", web::post().to(handlers::auth_handlers::login))
            .route("/api/announcements", web::get().to(handlers::feed_handlers::list))
            // Protected API
            .service(
                web::scope("/api")
                    .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
                    .wrap(actix_web::middleware::from_fn(
                        auth::middleware::require_api_content_type,
                    ))
                    .route("/logout", web::post().to(handlers::auth_handlers::logout))
                    .route("/me", web::get().to(handlers::auth_handlers::me))
                    // Topics
                    .route("/topics", web::get().to(handlers::topic_handlers::list))
                    .route("/topics", web::post().to(handlers::topic_handlers::create))
                    .route("/topics/{id}", web::patch().to(handlers::topic_handlers::update))
                    .route("/topics/{id}", web::delete().to(handlers::topic_handlers::delete))
                    .route("/topics/{id}/file", web::put().to(handlers::topic_handlers::upload_file))
                    .route("/topics/{id}/assign", web::post().to(handlers::topic_handlers::assign))
                    .route(
                        "/topics/{id}/unassign",
                        web::post().to(handlers::topic_handlers::unassign),
                    )
                    // Theses
                    .route(
                        "/thesis-details/{topic_id}",
                        web::get().to(handlers::thesis_handlers::details),
                    )
                    .route("/theses/mine", web::get().to(handlers::thesis_handlers::mine))
                    .route("/theses/{id}/gs", web::patch().to(handlers::thesis_handlers::set_gs))
                    .route(
                        "/theses/{id}/under-examination",
                        web::post().to(handlers::thesis_handlers::to_under_examination),
                    )
                    .route("/theses/{id}/cancel", web::post().to(handlers::thesis_handlers::cancel))
                    .route(
                        "/theses/{id}/complete",
                        web::post().to(handlers::thesis_handlers::complete),
                    )
                    // Committee invitations
                    .route(
                        "/theses/{id}/invitations",
                        web::post().to(handlers::invitation_handlers::create),
                    )
                    .route("/invitations", web::get().to(handlers::invitation_handlers::list))
                    .route(
                        "/invitations/{id}/accept",
                        web::post().to(handlers::invitation_handlers::accept),
                    )
                    .route(
                        "/invitations/{id}/reject",
                        web::post().to(handlers::invitation_handlers::reject),
                    )
                    // Examination progress
                    .route(
                        "/theses/{id}/draft",
                        web::put().to(handlers::progress_handlers::upload_draft),
                    )
                    .route(
                        "/theses/{id}/draft",
                        web::patch().to(handlers::progress_handlers::set_draft_links),
                    )
                    .route(
                        "/theses/{id}/presentation",
                        web::post().to(handlers::progress_handlers::set_presentation),
                    )
                    .route(
                        "/theses/{id}/library",
                        web::post().to(handlers::progress_handlers::set_library),
                    )
                    // Grades
                    .route(
                        "/theses/{id}/grades",
                        web::post().to(handlers::grade_handlers::submit),
                    )
                    .route("/theses/{id}/grades", web::get().to(handlers::grade_handlers::list))
                    // Examination minutes document
                    .route(
                        "/theses/{id}/minutes",
                        web::get().to(handlers::minutes_handlers::render),
                    )
                    // Administration & reporting
                    .route("/admin/import", web::post().to(handlers::admin_handlers::import))
                    .route("/admin/export", web::get().to(handlers::admin_handlers::export))
                    .route(
                        "/admin/theses",
                        web::get().to(handlers::admin_handlers::theses_in_progress),
                    )
                    .route(
                        "/admin/statistics",
                        web::get().to(handlers::admin_handlers::statistics),
                    )
                    .route(
                        "/statistics",
                        web::get().to(handlers::admin_handlers::professor_statistics),
                    ),
            )
            // Default 404 handler (must be registered last)
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound()
                    .json(serde_json::json!({ "error": "Δεν βρέθηκε" }))
            }))
    })
    .bind("127.0.0.1:8080")?
    .run()
    .await
}

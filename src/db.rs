use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use std::str::FromStr;

pub const MIGRATIONS: &str = include_str!("schema.sql");

pub async fn init_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(MIGRATIONS).execute(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

/// Seed the default secretariat account if no account of any role exists.
pub async fn seed_accounts(pool: &SqlitePool, password_hash: &str) -> Result<(), sqlx::Error> {
    let count: i64 = sqlx::query_scalar(
        "SELECT (SELECT COUNT(*) FROM students) \
              + (SELECT COUNT(*) FROM professors) \
              + (SELECT COUNT(*) FROM secretariat)",
    )
    .fetch_one(pool)
    .await?;

    if count > 0 {
        log::info!("Database already seeded ({count} accounts), skipping seed");
        return Ok(());
    }

    sqlx::query("INSERT INTO secretariat (username, password, name) VALUES (?1, ?2, ?3)")
        .bind("secretariat")
        .bind(password_hash)
        .bind("Γραμματεία Τμήματος")
        .execute(pool)
        .await?;

    log::info!("Seeded default secretariat account");
    Ok(())
}

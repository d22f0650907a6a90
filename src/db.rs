use anyhow::Context;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

/// Single connection: one user, one writer.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await
        .context("open database")?;
    Ok(pool)
}

/// Idempotent schema creation, run once at startup. The only schema
/// management this app does.
pub async fn ensure_schema(db: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS entries (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            item_name TEXT NOT NULL,
            calories_per_serving REAL NOT NULL,
            protein_per_serving REAL NOT NULL,
            serving_size REAL NOT NULL,
            weight_consumed REAL NOT NULL,
            computed_calories REAL NOT NULL,
            computed_protein REAL NOT NULL,
            meal_type TEXT NOT NULL DEFAULT 'other',
            log_date TEXT NOT NULL,
            logged_at TEXT NOT NULL
        )
        "#,
    )
    .execute(db)
    .await
    .context("create entries table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS goals (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            target_calories REAL NOT NULL,
            target_protein REAL NOT NULL
        )
        "#,
    )
    .execute(db)
    .await
    .context("create goals table")?;

    Ok(())
}

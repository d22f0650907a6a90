use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::db;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config.database_url).await?;
        db::ensure_schema(&db).await?;
        Ok(Self { db, config })
    }

    /// In-memory state for tests; each call gets an independent database.
    #[cfg(test)]
    pub async fn for_tests() -> Self {
        use crate::config::{Credentials, SessionConfig};

        let db = db::connect("sqlite::memory:").await.expect("in-memory pool");
        db::ensure_schema(&db).await.expect("schema");

        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            credentials: Credentials {
                username: "tester".into(),
                password: "hunter2".into(),
            },
            session: SessionConfig {
                secret: "test-secret".into(),
                issuer: "mealdash".into(),
                audience: "mealdash-dashboard".into(),
                ttl_minutes: 5,
            },
        });

        Self { db, config }
    }
}

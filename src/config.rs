use serde::Deserialize;

/// The single username/password pair allowed to open a session.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub credentials: Credentials,
    pub session: SessionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:meals.db?mode=rwc".into());
        let credentials = Credentials {
            username: std::env::var("DASH_USERNAME")?,
            password: std::env::var("DASH_PASSWORD")?,
        };
        let session = SessionConfig {
            secret: std::env::var("SESSION_SECRET")?,
            issuer: std::env::var("SESSION_ISSUER").unwrap_or_else(|_| "mealdash".into()),
            audience: std::env::var("SESSION_AUDIENCE")
                .unwrap_or_else(|_| "mealdash-dashboard".into()),
            ttl_minutes: std::env::var("SESSION_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(12 * 60),
        };
        Ok(Self {
            database_url,
            credentials,
            session,
        })
    }
}

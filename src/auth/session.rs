use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::state::AppState;

/// Payload of the signed session token issued on login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub jti: Uuid,   // session id
    pub iat: usize,  // issued at (unix timestamp)
    pub exp: usize,  // expires at (unix timestamp)
    pub iss: String, // issuer
    pub aud: String, // audience
}

/// Holds signing and verification keys with config data.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl_minutes: i64,
}

impl SessionKeys {
    pub fn new(cfg: &SessionConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl_minutes: cfg.ttl_minutes,
        }
    }

    pub fn sign(&self) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = SessionClaims {
            jti: Uuid::new_v4(),
            iat: now as usize,
            exp: (now + self.ttl_minutes * 60) as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<SessionClaims> {
        let mut validation = Validation::default();
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        validation.set_audience(std::slice::from_ref(&self.audience));
        let data = decode::<SessionClaims>(token, &self.decoding, &validation)?;
        Ok(data.claims)
    }
}

impl axum::extract::FromRef<AppState> for SessionKeys {
    fn from_ref(state: &AppState) -> Self {
        SessionKeys::new(&state.config.session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::new(&SessionConfig {
            secret: "test-secret".into(),
            issuer: "mealdash".into(),
            audience: "mealdash-dashboard".into(),
            ttl_minutes: 5,
        })
    }

    #[test]
    fn sign_then_verify() {
        let keys = keys();
        let token = keys.sign().expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.iss, "mealdash");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn garbage_token_rejected() {
        assert!(keys().verify("not-a-token").is_err());
    }

    #[test]
    fn expired_token_rejected() {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = SessionClaims {
            jti: Uuid::new_v4(),
            iat: (now - 7200) as usize,
            exp: (now - 3600) as usize,
            iss: "mealdash".into(),
            aud: "mealdash-dashboard".into(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_bytes()),
        )
        .expect("encode");

        assert!(keys().verify(&token).is_err());
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = keys().sign().expect("sign");
        let other = SessionKeys::new(&SessionConfig {
            secret: "different-secret".into(),
            issuer: "mealdash".into(),
            audience: "mealdash-dashboard".into(),
            ttl_minutes: 5,
        });
        assert!(other.verify(&token).is_err());
    }
}

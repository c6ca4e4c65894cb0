use std::time::Duration;

use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::auth::claims::Claims;
use crate::config::{ConfigError, JwtConfig};

/// Token verification failures. Expiry is reported separately from a bad
/// signature or malformed token so callers can tell the cases apart.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

/// Holds JWT signing and verification keys with config data.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys")
            .field("encoding", &"<redacted>")
            .field("decoding", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtKeys {
    /// Built once at startup; an unset or empty secret refuses to start
    /// rather than failing on the first login.
    pub fn from_config(cfg: &JwtConfig) -> Result<Self, ConfigError> {
        if cfg.secret.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl: Duration::from_secs((cfg.ttl_minutes.max(0) as u64) * 60),
        })
    }

    pub fn sign(&self, teacher_id: Uuid) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: teacher_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(teacher_id = %teacher_id, "jwt signed");
        Ok(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;
        debug!(teacher_id = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }

    #[cfg(test)]
    pub(crate) fn encode_claims(&self, claims: &Claims) -> String {
        encode(&Header::default(), claims, &self.encoding).expect("encode claims")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.into(),
            issuer: "test-issuer".into(),
            audience: "test-aud".into(),
            ttl_minutes: 5,
        }
    }

    fn make_keys(secret: &str) -> JwtKeys {
        JwtKeys::from_config(&config(secret)).expect("keys")
    }

    #[test]
    fn empty_secret_is_rejected_at_construction() {
        let err = JwtKeys::from_config(&config("")).unwrap_err();
        assert!(matches!(err, ConfigError::EmptySecret));
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = make_keys("dev-secret");
        let teacher_id = Uuid::new_v4();
        let token = keys.sign(teacher_id).expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.sub, teacher_id);
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
    }

    #[test]
    fn verify_rejects_wrong_secret_as_invalid() {
        let token = make_keys("secret-a").sign(Uuid::new_v4()).expect("sign");
        let err = make_keys("secret-b").verify(&token).unwrap_err();
        assert!(matches!(err, TokenError::Invalid));
    }

    #[test]
    fn verify_rejects_garbage_as_invalid() {
        let err = make_keys("dev-secret").verify("not.a.jwt").unwrap_err();
        assert!(matches!(err, TokenError::Invalid));
    }

    #[test]
    fn expired_token_is_expired_not_invalid() {
        // Well-signed token whose exp is far past the validation leeway.
        let keys = make_keys("dev-secret");
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            iat: (now - 7200) as usize,
            exp: (now - 3600) as usize,
            iss: "test-issuer".into(),
            aud: "test-aud".into(),
        };
        let token = keys.encode_claims(&claims);
        let err = keys.verify(&token).unwrap_err();
        assert!(matches!(err, TokenError::Expired));
    }

    #[test]
    fn verify_rejects_wrong_issuer_or_audience() {
        let keys = make_keys("same-secret");
        let other = JwtKeys::from_config(&JwtConfig {
            secret: "same-secret".into(),
            issuer: "other-issuer".into(),
            audience: "other-aud".into(),
            ttl_minutes: 5,
        })
        .expect("keys");
        let token = keys.sign(Uuid::new_v4()).expect("sign");
        let err = other.verify(&token).unwrap_err();
        assert!(matches!(err, TokenError::Invalid));
    }
}

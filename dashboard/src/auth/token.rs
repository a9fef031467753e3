use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use shared::types::TokenClaims;
use tracing::debug;

/// Answers "is this token structurally valid and not expired?".
pub trait TokenValidator: Send + Sync {
    fn validate(&self, token: &str) -> bool;
}

/// Client-side JWT check.
///
/// The dashboard does not hold the backend's signing key, so the signature is
/// not verified here; the backend rejects forged tokens on every call. This
/// only decides whether it is worth rendering a protected page at all.
#[derive(Debug, Clone)]
pub struct JwtValidator {
    validation: Validation,
}

impl JwtValidator {
    pub fn new(leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.leeway = leeway_secs;
        validation.set_required_spec_claims(&["exp"]);
        Self { validation }
    }

    pub fn claims(&self, token: &str) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
        decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &self.validation)
            .map(|data| data.claims)
    }
}

impl Default for JwtValidator {
    fn default() -> Self {
        Self::new(0)
    }
}

impl TokenValidator for JwtValidator {
    fn validate(&self, token: &str) -> bool {
        match self.claims(token) {
            Ok(_) => true,
            Err(e) => {
                debug!("Token rejected: {:?}", e.kind());
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn token_expiring_at(exp: u64) -> String {
        let claims = TokenClaims {
            sub: Some("7".into()),
            exp,
            iat: Some(now()),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"backend-only-secret"),
        )
        .unwrap()
    }

    #[test]
    fn fresh_token_is_valid_without_knowing_the_secret() {
        let v = JwtValidator::default();
        assert!(v.validate(&token_expiring_at(now() + 3600)));
    }

    #[test]
    fn expired_token_is_invalid() {
        let v = JwtValidator::default();
        assert!(!v.validate(&token_expiring_at(now() - 3600)));
    }

    #[test]
    fn leeway_tolerates_small_skew() {
        let v = JwtValidator::new(120);
        assert!(v.validate(&token_expiring_at(now() - 30)));
    }

    #[test]
    fn garbage_is_invalid() {
        let v = JwtValidator::default();
        assert!(!v.validate(""));
        assert!(!v.validate("not-a-jwt"));
        assert!(!v.validate("a.b.c"));
    }

    #[test]
    fn token_without_exp_is_invalid() {
        #[derive(serde::Serialize)]
        struct NoExp {
            sub: String,
        }
        let token = encode(
            &Header::default(),
            &NoExp { sub: "x".into() },
            &EncodingKey::from_secret(b"k"),
        )
        .unwrap();
        assert!(!JwtValidator::default().validate(&token));
    }
}

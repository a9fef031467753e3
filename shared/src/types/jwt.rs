use serde::{Deserialize, Serialize};

/// Claims read out of an access token on the dashboard side.
///
/// The dashboard never holds the signing key, so only structure and expiry
/// are inspected. Everything but `exp` is optional because the two backend
/// login flows (admin, client) do not issue identical claim sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Standard JWT subject: account id or email, depending on issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Standard JWT expiry (Unix timestamp, seconds).
    pub exp: u64,

    /// Issued-at (Unix timestamp, seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}

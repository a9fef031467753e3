use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Login wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginData {
    #[serde(alias = "username")]
    pub email: String,
    pub password: String,
}

impl LoginData {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Successful login body. Both backend login flows answer with the token and
/// the account's profile object; field names differ slightly between them.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginPayload {
    #[serde(alias = "accessToken", alias = "token")]
    pub access_token: String,
    #[serde(alias = "user", alias = "admin", alias = "client")]
    pub profile: serde_json::Value,
}

// ---------------------------------------------------------------------------
// Login errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum LoginError {
    MissingField(String),
    InvalidCredentials(Option<String>),
    InvalidToken,
    MalformedProfile,
    StorageError,
    NetworkError,
}

impl LoginError {
    pub fn to_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::MalformedProfile => "MALFORMED_PROFILE",
            Self::StorageError => "STORAGE_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
        }
    }

    pub fn to_message(&self) -> String {
        match self {
            Self::MissingField(field) => format!("Missing required field: {}", field),
            Self::InvalidCredentials(Some(message)) => message.clone(),
            Self::InvalidCredentials(None) => "Invalid email or password".to_string(),
            Self::InvalidToken => "The server issued an unusable session token".to_string(),
            Self::MalformedProfile => "The server returned an unreadable profile".to_string(),
            Self::StorageError => "Could not save the session on this device".to_string(),
            Self::NetworkError => "Could not reach the server. Please try again.".to_string(),
        }
    }
}

impl std::fmt::Display for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.to_code(), self.to_message())
    }
}

impl std::error::Error for LoginError {}

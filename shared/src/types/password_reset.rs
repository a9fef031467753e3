use serde::{Deserialize, Serialize};

/// Body of `POST /{admin|client}/send-otp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpRequest {
    pub email: String,
}

/// Body of `POST /{admin|client}/verify-otp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: String,
    #[serde(alias = "otp")]
    pub code: String,
    pub new_password: String,
}

/// Locally detected reset problems. Server-side rejections carry the
/// backend's own message instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetError {
    EmailRequired,
    CodeRequired,
    PasswordTooShort(usize),
    Rejected(String),
}

impl ResetError {
    pub fn to_code(&self) -> &'static str {
        match self {
            Self::EmailRequired => "EMAIL_REQUIRED",
            Self::CodeRequired => "CODE_REQUIRED",
            Self::PasswordTooShort(_) => "PASSWORD_TOO_SHORT",
            Self::Rejected(_) => "REJECTED",
        }
    }

    pub fn to_message(&self) -> String {
        match self {
            Self::EmailRequired => "Please enter your email address".to_string(),
            Self::CodeRequired => "Please enter the code from the email".to_string(),
            Self::PasswordTooShort(min) => {
                format!("Password is too short: at least {} characters", min)
            }
            Self::Rejected(message) => message.clone(),
        }
    }
}

impl std::fmt::Display for ResetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_message())
    }
}

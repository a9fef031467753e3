//! Backend collaborator: the REST API the dashboard talks to.

pub mod assets;
pub mod client;

use shared::types::{
    Entity, LoginData, LoginPayload, SendOtpRequest, UserType, VerifyOtpRequest,
};
use thiserror::Error;

pub use self::assets::asset_url;
pub use self::client::HttpBackend;

/// Shown when the backend gives no usable message.
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        status: u16,
        message: Option<String>,
    },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    Request(String),
}

impl ApiError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: Some(message.into()),
        }
    }

    /// HTTP status of a rejected call; `None` when no response arrived.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) | Self::Request(_) => None,
        }
    }

    /// The backend's own explanation, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// What the user sees: the server message, otherwise [`GENERIC_ERROR`].
    pub fn user_message(&self) -> String {
        self.server_message().unwrap_or(GENERIC_ERROR).to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}

/// Everything the dashboard asks of the backend.
///
/// Authenticated calls take the raw access token; the implementation decides
/// how to attach it.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn login(&self, user_type: UserType, data: &LoginData)
    -> Result<LoginPayload, ApiError>;

    async fn send_otp(&self, user_type: UserType, request: &SendOtpRequest)
    -> Result<(), ApiError>;

    async fn verify_otp_and_reset(
        &self,
        user_type: UserType,
        request: &VerifyOtpRequest,
    ) -> Result<(), ApiError>;

    /// Server-side check of the signed-in admin's password, used to gate
    /// destructive deletes.
    async fn confirm_password(&self, token: &str, password: &str) -> Result<(), ApiError>;

    async fn list<T: Entity>(&self, token: &str) -> Result<Vec<T>, ApiError>;

    async fn create<T: Entity>(&self, token: &str, draft: &T::Draft) -> Result<T, ApiError>;

    async fn update<T: Entity>(&self, token: &str, id: i64, draft: &T::Draft)
    -> Result<T, ApiError>;

    async fn delete<T: Entity>(&self, token: &str, id: i64) -> Result<(), ApiError>;
}

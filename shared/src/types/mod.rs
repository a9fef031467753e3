pub mod dashboard_config;
pub mod dashboard_stats;
pub mod entities;
pub mod json_error;
pub mod jwt;
pub mod login;
pub mod password_reset;
pub mod session;

pub use self::dashboard_config::{
    ApiConfig, AppConfig, AuthConfig, ConfigError, PasswordResetConfig, StorageConfig,
};
pub use self::dashboard_stats::{DashboardCounts, StatCard, StatKind, StatValue};
pub use self::entities::{
    Admin, AdminDraft, Client, ClientDraft, Entity, Exam, ExamDraft, WritingSection,
    WritingSectionDraft,
};
pub use self::json_error::ErrorResponse;
pub use self::jwt::TokenClaims;
pub use self::login::{LoginData, LoginError, LoginPayload};
pub use self::password_reset::{ResetError, SendOtpRequest, VerifyOtpRequest};
pub use self::session::{
    AdminProfile, AdminRole, ClientProfile, PROFILE_KEY, Principal, Profile, Role, SESSION_KEYS,
    Session, TOKEN_KEY, USER_TYPE_KEY, UserType,
};

//! Authentication for dashboard pages: token validation, the per-mount
//! guard, and the service that owns login and logout.

pub mod guard;
pub mod service;
pub mod token;

// Re-exports for convenience
pub use guard::{AuthCheck, RedirectReason, ensure_authenticated};
pub use service::AuthService;
pub use token::{JwtValidator, TokenValidator};

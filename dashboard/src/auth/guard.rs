use shared::types::{AdminRole, Principal, Role, UserType};
use tracing::{debug, warn};

use crate::auth::token::TokenValidator;
use crate::session::SessionStore;

/// Why a protected page refused to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    MissingToken,
    InvalidToken,
    MissingProfile,
    MissingUserType,
    MalformedProfile,
}

impl RedirectReason {
    pub fn to_code(&self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::MissingProfile => "MISSING_PROFILE",
            Self::MissingUserType => "MISSING_USER_TYPE",
            Self::MalformedProfile => "MALFORMED_PROFILE",
        }
    }
}

/// Outcome of the per-mount authentication check.
///
/// A redirect is never an inline error: the caller must navigate to `to`
/// and render nothing protected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthCheck {
    Authenticated(Principal),
    Redirect { to: String, reason: RedirectReason },
}

impl AuthCheck {
    pub fn authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    pub fn principal(&self) -> Option<Principal> {
        match self {
            Self::Authenticated(principal) => Some(*principal),
            Self::Redirect { .. } => None,
        }
    }

    pub fn user_type(&self) -> Option<UserType> {
        self.principal().map(|p| p.user_type())
    }

    pub fn role(&self) -> Option<Role> {
        self.principal().map(|p| p.role())
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Authenticated(_) => None,
            Self::Redirect { to, .. } => Some(to),
        }
    }
}

/// Run the guard against the stored session.
///
/// 1. token present and accepted by `validator`
/// 2. profile JSON and user type present
/// 3. profile JSON parses; admins take `role` from it (default `admin`),
///    clients are always `client`
pub fn ensure_authenticated(
    store: &SessionStore,
    validator: &dyn TokenValidator,
    login_route: &str,
) -> AuthCheck {
    let redirect = |reason: RedirectReason| {
        debug!("Auth guard redirecting to {}: {}", login_route, reason.to_code());
        AuthCheck::Redirect {
            to: login_route.to_string(),
            reason,
        }
    };

    let Some(token) = store.token() else {
        return redirect(RedirectReason::MissingToken);
    };

    if !validator.validate(&token) {
        return redirect(RedirectReason::InvalidToken);
    }

    let Some(profile_json) = store.profile_json() else {
        return redirect(RedirectReason::MissingProfile);
    };

    let Some(user_type) = store.user_type() else {
        return redirect(RedirectReason::MissingUserType);
    };

    let profile: serde_json::Value = match serde_json::from_str(&profile_json) {
        Ok(value @ serde_json::Value::Object(_)) => value,
        Ok(_) => {
            warn!("Stored profile is not a JSON object");
            return redirect(RedirectReason::MalformedProfile);
        }
        Err(e) => {
            warn!("Stored profile failed to parse: {}", e);
            return redirect(RedirectReason::MalformedProfile);
        }
    };

    let principal = match user_type {
        UserType::Admin => Principal::Admin {
            role: AdminRole::from_claim(profile.get("role").and_then(|r| r.as_str())),
        },
        UserType::Client => Principal::Client,
    };

    AuthCheck::Authenticated(principal)
}

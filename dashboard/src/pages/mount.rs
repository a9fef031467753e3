use shared::types::{Principal, Profile};
use tracing::debug;

use crate::auth::{AuthCheck, AuthService};
use crate::navigation::{NavItem, QuickAction, navigation, quick_actions};

/// Everything a protected page needs once the guard has let it through.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub principal: Principal,
    pub navigation: Vec<NavItem>,
    pub quick_actions: Vec<QuickAction>,
    /// Typed profile for the header; `None` if the stored JSON is readable
    /// enough for the guard but not for the full profile shape.
    pub profile: Option<Profile>,
}

/// Render state of a protected page.
///
/// Pages start in `Loading` and show only a placeholder until
/// [`Mount::resolve`] has run the guard.
#[derive(Debug, Clone, Default)]
pub enum Mount {
    #[default]
    Loading,
    Redirect(String),
    Ready(PageContext),
}

impl Mount {
    pub fn resolve(auth: &AuthService) -> Self {
        match auth.ensure_authenticated() {
            AuthCheck::Redirect { to, .. } => Self::Redirect(to),
            AuthCheck::Authenticated(principal) => {
                let role = principal.role();
                debug!("Mounted page for {}", role);
                Self::Ready(PageContext {
                    principal,
                    navigation: navigation(role),
                    quick_actions: quick_actions(role),
                    profile: auth.session().map(|s| s.profile),
                })
            }
        }
    }

    pub fn context(&self) -> Option<&PageContext> {
        match self {
            Self::Ready(ctx) => Some(ctx),
            Self::Loading | Self::Redirect(_) => None,
        }
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Redirect(to) => Some(to),
            Self::Loading | Self::Ready(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

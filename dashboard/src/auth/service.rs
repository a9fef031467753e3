use std::sync::{Arc, RwLock};

use shared::types::{AppConfig, LoginData, LoginError, Principal, Profile, Session, UserType};
use tracing::{debug, info, warn};

use crate::api::{ApiError, Backend};
use crate::auth::guard::{AuthCheck, ensure_authenticated};
use crate::auth::token::{JwtValidator, TokenValidator};
use crate::session::{SessionStore, StoreError};

/// The one place pages go to for anything session related.
///
/// Owns the session store and the token validator, and caches the principal
/// hydrated by the most recent successful guard run. Share it between pages
/// behind an `Arc`.
pub struct AuthService {
    store: SessionStore,
    validator: Arc<dyn TokenValidator>,
    login_route: String,
    current: RwLock<Option<Principal>>,
}

impl AuthService {
    pub fn init(
        store: SessionStore,
        validator: Arc<dyn TokenValidator>,
        login_route: impl Into<String>,
    ) -> Self {
        let login_route = login_route.into();
        info!("Auth service initialised (login route {})", login_route);
        Self {
            store,
            validator,
            login_route,
            current: RwLock::new(None),
        }
    }

    /// Wire up the default JWT validator from config.
    pub fn from_config(config: &AppConfig, store: SessionStore) -> Self {
        let validator = JwtValidator::new(config.auth.token_leeway_secs);
        Self::init(store, Arc::new(validator), config.auth.login_route.clone())
    }

    /// Forget the hydrated principal. Persisted data is left alone; the next
    /// mount re-runs the guard against it.
    pub fn teardown(&self) {
        self.set_current(None);
        debug!("Auth service torn down");
    }

    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Per-mount guard. Any redirect also destroys whatever is left of the
    /// stored session so a half-written or expired session cannot linger.
    pub fn ensure_authenticated(&self) -> AuthCheck {
        let check = ensure_authenticated(&self.store, self.validator.as_ref(), &self.login_route);

        match &check {
            AuthCheck::Authenticated(principal) => {
                self.set_current(Some(*principal));
            }
            AuthCheck::Redirect { reason, .. } => {
                self.set_current(None);
                if let Err(e) = self.store.clear() {
                    warn!("Failed to clear session after {}: {}", reason.to_code(), e);
                }
            }
        }

        check
    }

    /// Principal from the last guard run, if it succeeded.
    pub fn principal(&self) -> Option<Principal> {
        self.current.read().ok().and_then(|current| *current)
    }

    /// Raw access token for authenticated backend calls.
    pub fn token(&self) -> Option<String> {
        self.store.token()
    }

    /// Fully typed session, or `None` if any piece is missing or unreadable.
    pub fn session(&self) -> Option<Session> {
        let token = self.store.token()?;
        let user_type = self.store.user_type()?;
        let profile_json = self.store.profile_json()?;
        match Profile::from_json(user_type, &profile_json) {
            Ok(profile) => Some(Session::new(token, profile)),
            Err(e) => {
                warn!("Stored profile does not match {} shape: {}", user_type, e);
                None
            }
        }
    }

    /// Log in against the backend and persist the new session.
    pub async fn login<B: Backend>(
        &self,
        backend: &B,
        user_type: UserType,
        data: &LoginData,
    ) -> Result<Principal, LoginError> {
        if data.email.trim().is_empty() {
            return Err(LoginError::MissingField("email".into()));
        }
        if data.password.is_empty() {
            return Err(LoginError::MissingField("password".into()));
        }

        info!("Logging in {} account", user_type);

        let payload = backend.login(user_type, data).await.map_err(|e| match e {
            ApiError::Status { status, message } if (400..500).contains(&status) => {
                LoginError::InvalidCredentials(message)
            }
            other => {
                warn!("Login request failed: {}", other);
                LoginError::NetworkError
            }
        })?;

        if !self.validator.validate(&payload.access_token) {
            warn!("Backend issued a token that fails validation");
            return Err(LoginError::InvalidToken);
        }

        let profile = Profile::from_value(user_type, payload.profile).map_err(|e| {
            warn!("Login profile does not match {} shape: {}", user_type, e);
            LoginError::MalformedProfile
        })?;

        let session = Session::new(payload.access_token, profile);
        self.store.write(&session).map_err(|e| {
            warn!("Failed to persist session: {}", e);
            LoginError::StorageError
        })?;

        let principal = session.principal();
        self.set_current(Some(principal));
        info!("Logged in: {}", session);

        Ok(principal)
    }

    /// Clear all three session keys. After this the guard redirects.
    pub fn logout(&self) -> Result<(), StoreError> {
        self.set_current(None);
        self.store.clear()?;
        info!("Logged out");
        Ok(())
    }

    fn set_current(&self, principal: Option<Principal>) {
        match self.current.write() {
            Ok(mut current) => *current = principal,
            Err(_) => warn!("Auth state lock poisoned; principal not updated"),
        }
    }
}

use std::sync::Arc;

use anyhow::{Context, Result};
use shared::config::load_config;
use shared::types::{AppConfig, Entity, LoginData, LoginError, Principal, UserType};
use tracing::info;

use crate::api::{Backend, HttpBackend, asset_url};
use crate::auth::AuthService;
use crate::pages::{DashboardPage, ListPage, Mount, ResetWizard};
use crate::session::{FileStore, MemoryStore, SessionStore, StoreError};

/// Everything a running dashboard shares between its pages.
pub struct Dashboard<B: Backend> {
    config: AppConfig,
    auth: Arc<AuthService>,
    backend: B,
}

impl Dashboard<HttpBackend> {
    pub fn from_config_file(path: &str) -> Result<Self> {
        let config = load_config(path).with_context(|| format!("loading config {}", path))?;
        Self::from_config(config)
    }

    /// Session storage is file-backed when `storage.dir` is set and lives in
    /// memory otherwise.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let base_url = config
            .api
            .resolved_base_url()
            .context("no API base URL configured")?;

        let store = match &config.storage.dir {
            Some(dir) => {
                let file = FileStore::open(dir)
                    .with_context(|| format!("opening session store in {}", dir.display()))?;
                info!("Session persisted to {}", file.path().display());
                SessionStore::new(Arc::new(file))
            }
            None => {
                info!("No storage dir configured; session kept in memory");
                SessionStore::new(Arc::new(MemoryStore::new()))
            }
        };

        let backend = HttpBackend::new(&base_url);
        Ok(Self::with_backend(config, store, backend))
    }
}

impl<B: Backend> Dashboard<B> {
    pub fn with_backend(config: AppConfig, store: SessionStore, backend: B) -> Self {
        let auth = Arc::new(AuthService::from_config(&config, store));
        Self {
            config,
            auth,
            backend,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn auth(&self) -> &Arc<AuthService> {
        &self.auth
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn login(&self, user_type: UserType, data: &LoginData) -> Result<Principal, LoginError> {
        self.auth.login(&self.backend, user_type, data).await
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        self.auth.logout()
    }

    /// Run the guard for a page that needs nothing beyond the shell.
    pub fn mount(&self) -> Mount {
        Mount::resolve(&self.auth)
    }

    pub async fn open_dashboard(&self) -> DashboardPage {
        let mut page = DashboardPage::new();
        page.open(&self.auth, &self.backend).await;
        page
    }

    /// Guard, then fetch a collection. Returns the mount alongside so the
    /// caller can follow a redirect.
    pub async fn open_list<T: Entity>(&self) -> (Mount, ListPage<T>) {
        let mount = self.mount();
        let mut list = ListPage::new();
        if mount.context().is_some() {
            if let Some(token) = self.auth.token() {
                list.load(&self.backend, &token).await;
            }
        }
        (mount, list)
    }

    pub fn reset_wizard(&self, user_type: UserType) -> ResetWizard {
        ResetWizard::new(user_type, &self.config.password_reset)
    }

    /// Absolute URL for a backend-relative upload path.
    pub fn asset_url(&self, path: &str) -> Option<String> {
        let base = self.config.api.resolved_base_url()?;
        asset_url(&base, path)
    }
}

use shared::types::Entity;
use tracing::{info, warn};

use crate::api::{ApiError, Backend};
use crate::pages::form::ValidationError;
use crate::pages::list::ListPage;

/// Password re-entry before a destructive delete.
///
/// The password goes to the backend for verification; nothing is compared on
/// this side.
#[derive(Debug, Default)]
pub struct DeleteGate {
    target: Option<i64>,
    pub password: String,
    in_flight: bool,
    error: Option<String>,
}

impl DeleteGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, id: i64) {
        *self = Self {
            target: Some(id),
            ..Self::default()
        };
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn target(&self) -> Option<i64> {
        self.target
    }

    pub fn is_open(&self) -> bool {
        self.target.is_some()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn fail(&mut self, message: String) {
        self.in_flight = false;
        self.error = Some(message);
    }

    /// Verify the password, then delete and drop the row from `list`.
    /// Returns whether the item was deleted.
    pub async fn confirm<T, B>(&mut self, backend: &B, token: &str, list: &mut ListPage<T>) -> bool
    where
        T: Entity,
        B: Backend,
    {
        let Some(id) = self.target else {
            return false;
        };
        if self.in_flight {
            return false;
        }
        if self.password.is_empty() {
            self.error = Some(ValidationError::required("password").message);
            return false;
        }

        self.in_flight = true;
        self.error = None;

        if let Err(e) = backend.confirm_password(token, &self.password).await {
            warn!("Delete of {} #{} blocked: {}", T::COLLECTION, id, e);
            let message = match &e {
                ApiError::Status {
                    status: 401 | 403,
                    message: None,
                } => "Incorrect password".to_string(),
                other => other.user_message(),
            };
            self.fail(message);
            return false;
        }

        match backend.delete::<T>(token, id).await {
            Ok(()) => {
                info!("Deleted {} #{}", T::COLLECTION, id);
                list.remove(id);
                self.close();
                true
            }
            Err(e) => {
                warn!("Delete of {} #{} failed: {}", T::COLLECTION, id, e);
                self.fail(e.user_message());
                false
            }
        }
    }
}

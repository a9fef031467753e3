//! Two-step password reset: request a one-time code by email, then submit
//! the code together with a new password.
//!
//! [`ResetWizard`] is a plain state machine. `submit` and `resolve` return
//! the side effect the caller must perform next; [`run_submit`] is the
//! driver that performs them against a [`Backend`] and the [`AuthService`].

use std::time::Duration;

use shared::types::{
    PasswordResetConfig, ResetError, SendOtpRequest, UserType, VerifyOtpRequest,
};
use tracing::{debug, info, warn};

use crate::api::{ApiError, Backend};
use crate::auth::AuthService;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStep {
    Email,
    Verify,
}

/// Work the wizard asks its driver to do.
///
/// Requests carry the `ticket` that must be handed back to
/// [`ResetWizard::resolve`] with their answer.
#[derive(Debug, Clone)]
pub enum ResetEffect {
    SendCode {
        ticket: u64,
        user_type: UserType,
        request: SendOtpRequest,
    },
    VerifyAndReset {
        ticket: u64,
        user_type: UserType,
        request: VerifyOtpRequest,
    },
    /// Clear the session and go to the login route once `after` has passed.
    ForceLogout { after: Duration },
}

pub const CODE_SENT: &str = "A verification code has been sent to your email";
pub const PASSWORD_CHANGED: &str = "Password changed. You will be signed out shortly";

#[derive(Debug, Clone)]
pub struct ResetWizard {
    step: ResetStep,
    user_type: UserType,
    pub email: String,
    pub code: String,
    pub new_password: String,
    error: Option<String>,
    success: Option<String>,
    in_flight: bool,
    finished: bool,
    /// Bumped by every submit, `back` and `close`; answers stamped with an
    /// older value are stale.
    generation: u64,
    min_password_len: usize,
    logout_delay: Duration,
}

impl ResetWizard {
    pub fn new(user_type: UserType, config: &PasswordResetConfig) -> Self {
        Self {
            step: ResetStep::Email,
            user_type,
            email: String::new(),
            code: String::new(),
            new_password: String::new(),
            error: None,
            success: None,
            in_flight: false,
            finished: false,
            generation: 0,
            min_password_len: config.min_password_len,
            logout_delay: config.logout_delay(),
        }
    }

    pub fn step(&self) -> ResetStep {
        self.step
    }

    pub fn user_type(&self) -> UserType {
        self.user_type
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// The submit control is disabled while this is true.
    pub fn is_busy(&self) -> bool {
        self.in_flight || self.finished
    }

    /// Validate the current step and produce the request to send. `None`
    /// means nothing may be sent: a local validation error was recorded, a
    /// request is already in flight, or the reset has already completed.
    pub fn submit(&mut self) -> Option<ResetEffect> {
        if self.is_busy() {
            debug!("Reset submit ignored while busy");
            return None;
        }

        let ticket = self.generation + 1;
        let effect = match self.step {
            ResetStep::Email => {
                let email = self.email.trim();
                if email.is_empty() {
                    return self.reject(ResetError::EmailRequired);
                }
                ResetEffect::SendCode {
                    ticket,
                    user_type: self.user_type,
                    request: SendOtpRequest {
                        email: email.to_string(),
                    },
                }
            }
            ResetStep::Verify => {
                let code = self.code.trim();
                if code.is_empty() {
                    return self.reject(ResetError::CodeRequired);
                }
                if self.new_password.chars().count() < self.min_password_len {
                    return self.reject(ResetError::PasswordTooShort(self.min_password_len));
                }
                ResetEffect::VerifyAndReset {
                    ticket,
                    user_type: self.user_type,
                    request: VerifyOtpRequest {
                        email: self.email.trim().to_string(),
                        code: code.to_string(),
                        new_password: self.new_password.clone(),
                    },
                }
            }
        };

        self.generation = ticket;
        self.error = None;
        self.success = None;
        self.in_flight = true;
        Some(effect)
    }

    /// Apply the backend's answer to the request stamped with `ticket`.
    /// Answers to a request made before the last `close`, `back` or submit
    /// are dropped.
    pub fn resolve(&mut self, ticket: u64, result: Result<(), ApiError>) -> Option<ResetEffect> {
        if !self.in_flight || ticket != self.generation {
            debug!("Dropping stale reset response #{}", ticket);
            return None;
        }
        self.in_flight = false;

        match (self.step, result) {
            (ResetStep::Email, Ok(())) => {
                info!("Reset code sent");
                self.step = ResetStep::Verify;
                self.success = Some(CODE_SENT.to_string());
                None
            }
            (ResetStep::Verify, Ok(())) => {
                info!("Password reset accepted; forcing logout");
                self.finished = true;
                self.success = Some(PASSWORD_CHANGED.to_string());
                Some(ResetEffect::ForceLogout {
                    after: self.logout_delay,
                })
            }
            (step, Err(e)) => {
                warn!("Reset step {:?} rejected: {}", step, e);
                self.error = Some(ResetError::Rejected(e.user_message()).to_message());
                None
            }
        }
    }

    /// From `Verify` back to `Email`, keeping the typed address.
    pub fn back(&mut self) {
        if self.step != ResetStep::Verify || self.is_busy() {
            return;
        }
        self.generation += 1;
        self.step = ResetStep::Email;
        self.code.clear();
        self.new_password.clear();
        self.error = None;
        self.success = None;
    }

    /// Reset every field, whatever the current step.
    pub fn close(&mut self) {
        *self = Self {
            step: ResetStep::Email,
            user_type: self.user_type,
            email: String::new(),
            code: String::new(),
            new_password: String::new(),
            error: None,
            success: None,
            in_flight: false,
            finished: false,
            generation: self.generation + 1,
            min_password_len: self.min_password_len,
            logout_delay: self.logout_delay,
        };
    }

    fn reject(&mut self, err: ResetError) -> Option<ResetEffect> {
        debug!("Reset input rejected locally: {}", err.to_code());
        self.error = Some(err.to_message());
        None
    }
}

/// What the page should do after a submit round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// Nothing was sent (validation error or busy).
    NotSent,
    /// The request completed; the wizard shows the result.
    Stayed,
    /// The session was cleared; navigate to the login route.
    Redirect(String),
}

/// Submit the wizard and carry out every effect it asks for, including the
/// delayed forced logout.
pub async fn run_submit<B: Backend>(
    wizard: &mut ResetWizard,
    backend: &B,
    auth: &AuthService,
) -> ResetOutcome {
    let Some(effect) = wizard.submit() else {
        return ResetOutcome::NotSent;
    };

    let (ticket, result) = match effect {
        ResetEffect::SendCode {
            ticket,
            user_type,
            request,
        } => (ticket, backend.send_otp(user_type, &request).await),
        ResetEffect::VerifyAndReset {
            ticket,
            user_type,
            request,
        } => (ticket, backend.verify_otp_and_reset(user_type, &request).await),
        ResetEffect::ForceLogout { .. } => {
            return ResetOutcome::NotSent;
        }
    };

    match wizard.resolve(ticket, result) {
        Some(ResetEffect::ForceLogout { after }) => {
            tokio::time::sleep(after).await;
            if let Err(e) = auth.logout() {
                warn!("Forced logout could not clear the session: {}", e);
            }
            ResetOutcome::Redirect(auth.login_route().to_string())
        }
        _ => ResetOutcome::Stayed,
    }
}

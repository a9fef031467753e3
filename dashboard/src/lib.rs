//! Session core of the exam-platform admin dashboard.
//!
//! Pages share one [`AuthService`], which owns the persisted session and
//! runs the per-mount guard. Role-gated navigation, dashboard statistics,
//! the entity list/form/delete dialogs and the password-reset wizard are
//! built on top of it and talk to the REST API through a [`Backend`].

pub mod api;
pub mod app;
pub mod auth;
pub mod navigation;
pub mod pages;
pub mod session;
pub mod telemetry;

pub use api::{ApiError, Backend, HttpBackend};
pub use app::Dashboard;
pub use auth::{AuthCheck, AuthService};
pub use session::SessionStore;

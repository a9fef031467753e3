//! Page-level state machines. Each page mounts through the auth guard
//! before it shows anything.

pub mod dashboard;
pub mod delete;
pub mod form;
pub mod list;
pub mod mount;
pub mod password_reset;

pub use dashboard::{DashboardPage, compose_stats, gather_counts};
pub use delete::DeleteGate;
pub use form::{FormMode, FormState, Validate, ValidationError, submit};
pub use list::ListPage;
pub use mount::{Mount, PageContext};
pub use password_reset::{ResetEffect, ResetOutcome, ResetStep, ResetWizard, run_submit};

use shared::types::{AdminDraft, ClientDraft, Entity, ExamDraft, WritingSectionDraft};
use thiserror::Error;
use tracing::{info, warn};

use crate::api::{ApiError, Backend};
use crate::pages::list::ListPage;

/// A client-side check that failed; shown next to `field`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str) -> Self {
        Self::new(field, "This field is required")
    }
}

/// Checks a draft before it is sent.
pub trait Validate {
    fn validate(&self) -> Vec<ValidationError>;
}

fn require(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::required(field));
    }
}

impl Validate for ExamDraft {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        require(&mut errors, "title", &self.title);
        errors
    }
}

impl Validate for WritingSectionDraft {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        require(&mut errors, "title", &self.title);
        require(&mut errors, "prompt", &self.prompt);
        if self.exam_id <= 0 {
            errors.push(ValidationError::new("exam_id", "Choose an exam"));
        }
        errors
    }
}

impl Validate for AdminDraft {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        require(&mut errors, "full_name", &self.full_name);
        require(&mut errors, "email", &self.email);
        errors
    }
}

impl Validate for ClientDraft {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        require(&mut errors, "full_name", &self.full_name);
        require(&mut errors, "email", &self.email);
        if self.mock_price < 0.0 {
            errors.push(ValidationError::new("mock_price", "Price cannot be negative"));
        }
        errors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// A create/edit dialog.
///
/// On a rejected submission the dialog stays open with the draft intact so
/// the user can correct it and retry.
#[derive(Debug, Clone)]
pub struct FormState<D> {
    pub mode: FormMode,
    pub draft: D,
    open: bool,
    in_flight: bool,
    field_errors: Vec<ValidationError>,
    error: Option<String>,
}

impl<D: Validate + Default> FormState<D> {
    pub fn create() -> Self {
        Self::with(FormMode::Create, D::default())
    }

    pub fn edit(id: i64, draft: D) -> Self {
        Self::with(FormMode::Edit(id), draft)
    }

    fn with(mode: FormMode, draft: D) -> Self {
        Self {
            mode,
            draft,
            open: true,
            in_flight: false,
            field_errors: Vec::new(),
            error: None,
        }
    }

    /// Validate and mark the submission as in flight. `false` means no
    /// request may be sent: invalid input, closed dialog, or already sending.
    pub fn begin(&mut self) -> bool {
        if !self.open || self.in_flight {
            return false;
        }
        self.field_errors = self.draft.validate();
        if !self.field_errors.is_empty() {
            return false;
        }
        self.error = None;
        self.in_flight = true;
        true
    }

    pub fn fail(&mut self, err: &ApiError) {
        self.in_flight = false;
        self.error = Some(err.user_message());
    }

    /// Close after a successful submission.
    pub fn succeed(&mut self) {
        self.close();
    }

    /// Close and reset to a blank draft.
    pub fn close(&mut self) {
        self.open = false;
        self.in_flight = false;
        self.draft = D::default();
        self.field_errors.clear();
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn field_errors(&self) -> &[ValidationError] {
        &self.field_errors
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Submit a create or edit dialog and patch the list on success.
/// Returns whether the backend accepted it.
pub async fn submit<T, B>(
    form: &mut FormState<T::Draft>,
    backend: &B,
    token: &str,
    list: &mut ListPage<T>,
) -> bool
where
    T: Entity,
    T::Draft: Validate + Default,
    B: Backend,
{
    if !form.begin() {
        return false;
    }

    let result = match form.mode {
        FormMode::Create => backend.create::<T>(token, &form.draft).await,
        FormMode::Edit(id) => backend.update::<T>(token, id, &form.draft).await,
    };

    match result {
        Ok(item) => {
            info!("Saved {} #{}", T::COLLECTION, item.id());
            list.upsert(item);
            form.succeed();
            true
        }
        Err(e) => {
            warn!("Saving {} failed: {}", T::COLLECTION, e);
            form.fail(&e);
            false
        }
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{ApiError, ApiResult};

/// Input for registering a new employee.
///
/// `cpf` may arrive punctuated (`123.456.789-01`); normalization happens
/// in the service, not here.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateEmployeeCommand {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 11, max = 14))]
    pub cpf: String,

    #[validate(length(min = 1, max = 30))]
    pub registration_number: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    pub birth_date: Option<NaiveDate>,

    #[validate(length(max = 60))]
    pub position: Option<String>,

    pub hired_at: NaiveDate,
}

/// Partial update for an employee; only supplied fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateEmployeeCommand {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 11, max = 14))]
    pub cpf: Option<String>,

    #[validate(length(min = 1, max = 30))]
    pub registration_number: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = 20))]
    pub phone: Option<String>,

    pub birth_date: Option<NaiveDate>,

    #[validate(length(max = 60))]
    pub position: Option<String>,

    pub hired_at: Option<NaiveDate>,

    pub is_active: Option<bool>,
}

impl UpdateEmployeeCommand {
    /// True when no field at all was supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.cpf.is_none()
            && self.registration_number.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.birth_date.is_none()
            && self.position.is_none()
            && self.hired_at.is_none()
            && self.is_active.is_none()
    }
}

/// Input for registering a document type in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDocumentTypeCommand {
    #[validate(length(min = 1, max = 30))]
    pub code: String,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(max = 255))]
    pub description: Option<String>,

    #[validate(range(min = 1))]
    pub validity_period_months: Option<i32>,

    pub is_mandatory: bool,
}

/// A file handed to the upload engine, already read off the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadCommand {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    /// Caller identity, taken from the authenticated principal.
    pub uploaded_by: String,
}

/// Runs the declarative `validator` rules and folds failures into the
/// domain error type.
pub fn check<T: Validate>(input: &T) -> ApiResult<()> {
    input
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))
}

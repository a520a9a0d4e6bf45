use thiserror::Error;

/// Field whose uniqueness constraint was violated.
///
/// Carried by [`ApiError::Conflict`] so callers never have to sniff
/// database error codes to learn which field collided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    EmployeeCpf,
    EmployeeRegistrationNumber,
    DocumentTypeCode,
    AssignmentPair,
}

impl std::fmt::Display for ConflictField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictField::EmployeeCpf => write!(f, "cpf"),
            ConflictField::EmployeeRegistrationNumber => write!(f, "registration_number"),
            ConflictField::DocumentTypeCode => write!(f, "code"),
            ConflictField::AssignmentPair => write!(f, "employee_id/document_type_id"),
        }
    }
}

/// Error taxonomy exposed at the service boundary.
///
/// A binding layer maps each variant to a status class:
/// validation -> 400, not-found -> 404, conflict -> 409,
/// unsupported media -> 415, internal -> 500.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict on {field}: {message}")]
    Conflict { field: ConflictField, message: String },

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn conflict(field: ConflictField, message: impl Into<String>) -> Self {
        ApiError::Conflict {
            field,
            message: message.into(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

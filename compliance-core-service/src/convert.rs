use compliance_core_api::error::{ApiError, ApiResult, ConflictField};
use compliance_core_db::repository::error::RepositoryError;
use heapless::String as HeaplessString;

/// Converts a boundary string into a bounded model field.
pub fn bounded<const N: usize>(value: &str, field: &str) -> ApiResult<HeaplessString<N>> {
    HeaplessString::try_from(value)
        .map_err(|_| ApiError::ValidationError(format!("{field} is too long (max {N} chars)")))
}

pub fn bounded_opt<const N: usize>(
    value: Option<&str>,
    field: &str,
) -> ApiResult<Option<HeaplessString<N>>> {
    value.map(|v| bounded(v, field)).transpose()
}

/// Lifts repository errors to the service boundary.
///
/// Typed unique violations become conflicts with a message naming the
/// offending field; anything else is internal.
pub fn map_repo_err(err: RepositoryError) -> ApiError {
    match err {
        RepositoryError::UniqueViolation(field) => {
            let message = match field {
                ConflictField::EmployeeCpf => "There is already an employee with this CPF.",
                ConflictField::EmployeeRegistrationNumber => {
                    "There is already an employee with this registration number."
                }
                ConflictField::DocumentTypeCode => "Document type code must be unique.",
                ConflictField::AssignmentPair => "Document type already assigned to employee.",
            };
            ApiError::conflict(field, message)
        }
        RepositoryError::Backend(e) => ApiError::InternalError(e.to_string()),
    }
}

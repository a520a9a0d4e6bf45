use compliance_core_api::error::ConflictField;
use compliance_core_db::repository::error::RepositoryError;
use heapless::String as HeaplessString;
use sqlx::{postgres::PgRow, Row};
use std::error::Error;
use std::str::FromStr;

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

/// Retrieves a required `HeaplessString` from a row.
pub fn get_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>> {
    let s: String = row.try_get(col_name)?;
    HeaplessString::from_str(&s)
        .map_err(|_| format!("Value for column '{col_name}' is too long (max {N} chars)").into())
}

/// Retrieves an optional `HeaplessString` from a row.
pub fn get_optional_heapless_string<const N: usize>(
    row: &PgRow,
    col_name: &str,
) -> Result<Option<HeaplessString<N>>, Box<dyn Error + Send + Sync>> {
    let s: Option<String> = row.try_get(col_name)?;
    s.map(|val| HeaplessString::from_str(&val))
        .transpose()
        .map_err(|_| format!("Value for column '{col_name}' is too long (max {N} chars)").into())
}

/// Conflict field behind a named unique constraint, if we own it.
pub fn conflict_field_for_constraint(constraint: &str) -> Option<ConflictField> {
    match constraint {
        "uq_employee_cpf" => Some(ConflictField::EmployeeCpf),
        "uq_employee_registration_number" => Some(ConflictField::EmployeeRegistrationNumber),
        "uq_document_type_code" => Some(ConflictField::DocumentTypeCode),
        "uq_employee_document_pair" => Some(ConflictField::AssignmentPair),
        _ => None,
    }
}

/// Translates a sqlx error into the repository error surface.
///
/// Unique violations (SQLSTATE 23505) on constraints we own become typed
/// [`RepositoryError::UniqueViolation`]s; everything else stays a backend
/// error.
pub fn map_sqlx_err(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            if let Some(field) = db_err.constraint().and_then(conflict_field_for_constraint) {
                return RepositoryError::UniqueViolation(field);
            }
        }
    }
    RepositoryError::backend(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_constraints_map_to_fields() {
        assert_eq!(
            conflict_field_for_constraint("uq_employee_cpf"),
            Some(ConflictField::EmployeeCpf)
        );
        assert_eq!(
            conflict_field_for_constraint("uq_employee_registration_number"),
            Some(ConflictField::EmployeeRegistrationNumber)
        );
        assert_eq!(
            conflict_field_for_constraint("uq_document_type_code"),
            Some(ConflictField::DocumentTypeCode)
        );
        assert_eq!(
            conflict_field_for_constraint("uq_employee_document_pair"),
            Some(ConflictField::AssignmentPair)
        );
    }

    #[test]
    fn foreign_constraints_do_not_map() {
        assert_eq!(conflict_field_for_constraint("uq_document_version"), None);
        assert_eq!(conflict_field_for_constraint(""), None);
    }

    #[test]
    fn non_database_errors_stay_backend() {
        let err = map_sqlx_err(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Backend(_)));
    }
}

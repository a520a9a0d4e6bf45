use async_trait::async_trait;
use uuid::Uuid;

use crate::models::employee::{EmployeeChanges, EmployeeModel};
use crate::repository::error::RepositoryResult;

/// Persistence contract for the employee registry.
///
/// Uniqueness of `cpf` and `registration_number` is enforced by the
/// backend; a violated constraint surfaces as
/// [`RepositoryError::UniqueViolation`] with the offending field.
///
/// [`RepositoryError::UniqueViolation`]: crate::repository::error::RepositoryError::UniqueViolation
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Persist a new employee and return the stored row.
    async fn create(&self, employee: EmployeeModel) -> RepositoryResult<EmployeeModel>;

    /// Apply a partial update; `Ok(None)` when no row has this id.
    async fn update(
        &self,
        id: Uuid,
        changes: EmployeeChanges,
    ) -> RepositoryResult<Option<EmployeeModel>>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<EmployeeModel>>;

    /// Lookup by normalized 11-digit CPF.
    async fn find_by_cpf(&self, cpf: &str) -> RepositoryResult<Option<EmployeeModel>>;
}

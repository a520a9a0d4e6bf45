use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use compliance_core_api::error::{ApiError, ApiResult, ConflictField};
use compliance_core_db::models::assignment::AssignmentModel;
use compliance_core_db::repository::assignment_repository::AssignmentRepository;
use compliance_core_db::repository::employee_repository::EmployeeRepository;
use compliance_core_db::repository::error::RepositoryError;

use crate::convert::map_repo_err;

/// Assignment ledger: links employees to the document types they owe.
pub struct AssignmentService {
    employees: Arc<dyn EmployeeRepository>,
    assignments: Arc<dyn AssignmentRepository>,
}

impl AssignmentService {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        assignments: Arc<dyn AssignmentRepository>,
    ) -> Self {
        Self {
            employees,
            assignments,
        }
    }

    /// Assigns each document type in order, status `Pending`.
    ///
    /// A duplicate pair fails the whole call with a conflict naming the
    /// offending document type. Assignments created by earlier ids of the
    /// same call stay committed; there is no rollback, so a conflicting
    /// batch leaves a deterministic prefix behind.
    pub async fn assign(
        &self,
        employee_id: Uuid,
        document_type_ids: &[Uuid],
    ) -> ApiResult<Vec<AssignmentModel>> {
        self.require_employee(employee_id).await?;

        let mut results = Vec::with_capacity(document_type_ids.len());
        for &document_type_id in document_type_ids {
            let assignment = AssignmentModel::pending(employee_id, document_type_id, Utc::now());
            match self.assignments.create(assignment).await {
                Ok(created) => results.push(created),
                Err(RepositoryError::UniqueViolation(ConflictField::AssignmentPair)) => {
                    return Err(ApiError::conflict(
                        ConflictField::AssignmentPair,
                        format!("Document type {document_type_id} already assigned to employee"),
                    ));
                }
                Err(e) => return Err(map_repo_err(e)),
            }
        }

        info!(
            employee_id = %employee_id,
            count = results.len(),
            "document types assigned"
        );
        Ok(results)
    }

    /// Removes each listed link, cascading to its uploaded documents.
    ///
    /// A pair that was never assigned fails with not-found naming the
    /// pair; earlier deletions of the same call stay committed.
    pub async fn unassign(
        &self,
        employee_id: Uuid,
        document_type_ids: &[Uuid],
    ) -> ApiResult<Vec<AssignmentModel>> {
        self.require_employee(employee_id).await?;

        let mut removed = Vec::with_capacity(document_type_ids.len());
        for &document_type_id in document_type_ids {
            let deleted = self
                .assignments
                .delete_by_pair(employee_id, document_type_id)
                .await
                .map_err(map_repo_err)?
                .ok_or_else(|| {
                    ApiError::NotFound(format!(
                        "Document type {document_type_id} is not assigned to employee {employee_id}"
                    ))
                })?;
            removed.push(deleted);
        }

        info!(
            employee_id = %employee_id,
            count = removed.len(),
            "document types unassigned"
        );
        Ok(removed)
    }

    async fn require_employee(&self, employee_id: Uuid) -> ApiResult<()> {
        self.employees
            .find_by_id(employee_id)
            .await
            .map_err(map_repo_err)?
            .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;
        Ok(())
    }
}

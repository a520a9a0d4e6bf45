use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use compliance_core_api::error::{ApiError, ApiResult};
use compliance_core_db::models::report::{AssignmentListRow, AssignmentStatusRow};
use compliance_core_db::repository::assignment_repository::AssignmentRepository;
use compliance_core_db::repository::employee_repository::EmployeeRepository;
use compliance_core_db::repository::filter::AssignmentQuery;
use compliance_core_db::repository::pagination::Page;

use crate::convert::map_repo_err;

/// Compliance report for one employee: one entry per assigned type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub employee_id: Uuid,
    pub documents: Vec<AssignmentStatusRow>,
}

/// Read-only reporting over the assignment ledger.
pub struct StatusService {
    employees: Arc<dyn EmployeeRepository>,
    assignments: Arc<dyn AssignmentRepository>,
}

impl StatusService {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        assignments: Arc<dyn AssignmentRepository>,
    ) -> Self {
        Self {
            employees,
            assignments,
        }
    }

    pub async fn get_status(&self, employee_id: Uuid) -> ApiResult<StatusReport> {
        self.employees
            .find_by_id(employee_id)
            .await
            .map_err(map_repo_err)?
            .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

        let documents = self
            .assignments
            .status_rows(employee_id)
            .await
            .map_err(map_repo_err)?;

        Ok(StatusReport {
            employee_id,
            documents,
        })
    }

    /// Paginated listing, one row per assignment. `total` counts
    /// assignments, never the documents stacked behind them.
    pub async fn list_documents(
        &self,
        query: AssignmentQuery,
    ) -> ApiResult<Page<AssignmentListRow>> {
        if query.page < 1 {
            return Err(ApiError::ValidationError("page must be >= 1".to_string()));
        }
        if query.limit < 1 {
            return Err(ApiError::ValidationError("limit must be >= 1".to_string()));
        }

        self.assignments
            .find_page(
                &query.filter,
                query.order_by,
                query.order,
                query.page_request(),
            )
            .await
            .map_err(map_repo_err)
    }
}

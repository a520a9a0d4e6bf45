use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::assignment::AssignmentModel;
use crate::models::report::{AssignmentListRow, AssignmentStatusRow};
use crate::repository::error::RepositoryResult;
use crate::repository::filter::{AssignmentFilter, OrderField, SortOrder};
use crate::repository::pagination::{Page, PageRequest};

/// Persistence contract for the assignment ledger.
///
/// Pair uniqueness is optimistic: concurrent creates for the same
/// (employee_id, document_type_id) race at the unique index and exactly one
/// caller observes a unique violation.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Persist a new link; the model already carries status and timestamps.
    async fn create(&self, assignment: AssignmentModel) -> RepositoryResult<AssignmentModel>;

    async fn find_by_pair(
        &self,
        employee_id: Uuid,
        document_type_id: Uuid,
    ) -> RepositoryResult<Option<AssignmentModel>>;

    /// Delete the link and (cascading) its documents; `Ok(None)` when the
    /// pair was never assigned.
    async fn delete_by_pair(
        &self,
        employee_id: Uuid,
        document_type_id: Uuid,
    ) -> RepositoryResult<Option<AssignmentModel>>;

    /// Forward-only transition to `Sent`, stamping `sent_at`.
    async fn mark_sent(
        &self,
        assignment_id: Uuid,
        sent_at: DateTime<Utc>,
    ) -> RepositoryResult<()>;

    /// Status report rows for one employee, document-type names included.
    async fn status_rows(&self, employee_id: Uuid) -> RepositoryResult<Vec<AssignmentStatusRow>>;

    /// Filtered, ordered, paginated listing joined with employee and
    /// document-type names. One row per assignment.
    async fn find_page(
        &self,
        filter: &AssignmentFilter,
        order_by: OrderField,
        order: SortOrder,
        page: PageRequest,
    ) -> RepositoryResult<Page<AssignmentListRow>>;
}

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::document::{DocumentModel, NewDocument};
use crate::repository::error::RepositoryResult;

/// Persistence contract for uploaded documents.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a document, assigning `version = count(rows for the
    /// assignment) + 1` atomically.
    ///
    /// The count and the insert must not be observable separately:
    /// implementations serialize per assignment (the Postgres one locks
    /// the assignment row inside the insert transaction) so concurrent
    /// uploads to one assignment get distinct, gap-free versions.
    async fn create_versioned(&self, document: NewDocument) -> RepositoryResult<DocumentModel>;

    async fn count_for_assignment(&self, assignment_id: Uuid) -> RepositoryResult<i64>;

    /// Version history of one assignment, oldest first.
    async fn list_for_assignment(
        &self,
        assignment_id: Uuid,
    ) -> RepositoryResult<Vec<DocumentModel>>;
}

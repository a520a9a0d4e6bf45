use async_trait::async_trait;
use uuid::Uuid;

use crate::models::document_type::DocumentTypeModel;
use crate::repository::error::RepositoryResult;

/// Persistence contract for the document type catalog.
#[async_trait]
pub trait DocumentTypeRepository: Send + Sync {
    /// Persist a new type; duplicate codes surface as a unique violation.
    async fn create(&self, document_type: DocumentTypeModel)
        -> RepositoryResult<DocumentTypeModel>;

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<DocumentTypeModel>>;

    async fn find_by_code(&self, code: &str) -> RepositoryResult<Option<DocumentTypeModel>>;

    /// Whole catalog, ordered by code.
    async fn list(&self) -> RepositoryResult<Vec<DocumentTypeModel>>;
}

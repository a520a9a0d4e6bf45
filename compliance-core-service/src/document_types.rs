use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use compliance_core_api::domain::commands::{check, CreateDocumentTypeCommand};
use compliance_core_api::error::{ApiError, ApiResult};
use compliance_core_db::models::document_type::DocumentTypeModel;
use compliance_core_db::repository::document_type_repository::DocumentTypeRepository;

use crate::convert::{bounded, bounded_opt, map_repo_err};

/// Document type catalog.
pub struct DocumentTypeService {
    repo: Arc<dyn DocumentTypeRepository>,
}

impl DocumentTypeService {
    pub fn new(repo: Arc<dyn DocumentTypeRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, cmd: CreateDocumentTypeCommand) -> ApiResult<DocumentTypeModel> {
        check(&cmd)?;

        let now = Utc::now();
        let document_type = DocumentTypeModel {
            id: Uuid::new_v4(),
            code: bounded(&cmd.code, "code")?,
            name: bounded(&cmd.name, "name")?,
            description: bounded_opt(cmd.description.as_deref(), "description")?,
            validity_period_months: cmd.validity_period_months,
            is_mandatory: cmd.is_mandatory,
            created_at: now,
            updated_at: now,
        };

        let saved = self
            .repo
            .create(document_type)
            .await
            .map_err(map_repo_err)?;
        info!(document_type_id = %saved.id, code = %saved.code, "document type created");
        Ok(saved)
    }

    pub async fn get(&self, id: Uuid) -> ApiResult<DocumentTypeModel> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(map_repo_err)?
            .ok_or_else(|| ApiError::NotFound("Document type not found".to_string()))
    }

    pub async fn list(&self) -> ApiResult<Vec<DocumentTypeModel>> {
        self.repo.list().await.map_err(map_repo_err)
    }
}

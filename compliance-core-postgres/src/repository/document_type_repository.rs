use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use std::error::Error;
use uuid::Uuid;

use compliance_core_db::models::document_type::DocumentTypeModel;
use compliance_core_db::repository::document_type_repository::DocumentTypeRepository;
use compliance_core_db::repository::error::{RepositoryError, RepositoryResult};

use crate::utils::{get_heapless_string, get_optional_heapless_string, map_sqlx_err, TryFromRow};

pub struct DocumentTypeRepositoryImpl {
    pool: PgPool,
}

impl DocumentTypeRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for DocumentTypeModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        use sqlx::Row;
        Ok(DocumentTypeModel {
            id: row.try_get("id")?,
            code: get_heapless_string(row, "code")?,
            name: get_heapless_string(row, "name")?,
            description: get_optional_heapless_string(row, "description")?,
            validity_period_months: row.try_get("validity_period_months")?,
            is_mandatory: row.try_get("is_mandatory")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl DocumentTypeRepository for DocumentTypeRepositoryImpl {
    async fn create(
        &self,
        document_type: DocumentTypeModel,
    ) -> RepositoryResult<DocumentTypeModel> {
        sqlx::query(
            r#"
            INSERT INTO document_types
            (id, code, name, description, validity_period_months, is_mandatory, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(document_type.id)
        .bind(document_type.code.as_str())
        .bind(document_type.name.as_str())
        .bind(document_type.description.as_deref())
        .bind(document_type.validity_period_months)
        .bind(document_type.is_mandatory)
        .bind(document_type.created_at)
        .bind(document_type.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(document_type)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<DocumentTypeModel>> {
        let row = sqlx::query("SELECT * FROM document_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        row.as_ref()
            .map(DocumentTypeModel::try_from_row)
            .transpose()
            .map_err(RepositoryError::Backend)
    }

    async fn find_by_code(&self, code: &str) -> RepositoryResult<Option<DocumentTypeModel>> {
        let row = sqlx::query("SELECT * FROM document_types WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        row.as_ref()
            .map(DocumentTypeModel::try_from_row)
            .transpose()
            .map_err(RepositoryError::Backend)
    }

    async fn list(&self) -> RepositoryResult<Vec<DocumentTypeModel>> {
        let rows = sqlx::query("SELECT * FROM document_types ORDER BY code")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        rows.iter()
            .map(DocumentTypeModel::try_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::Backend)
    }
}

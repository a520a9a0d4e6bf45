use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::error::Error;
use uuid::Uuid;

use compliance_core_db::models::document::{DocumentModel, NewDocument};
use compliance_core_db::repository::document_repository::DocumentRepository;
use compliance_core_db::repository::error::{RepositoryError, RepositoryResult};

use crate::utils::{get_heapless_string, map_sqlx_err, TryFromRow};

pub struct DocumentRepositoryImpl {
    pool: PgPool,
}

impl DocumentRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for DocumentModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(DocumentModel {
            id: row.try_get("id")?,
            assignment_id: row.try_get("employee_document_id")?,
            file_name: get_heapless_string(row, "file_name")?,
            mime_type: get_heapless_string(row, "mime_type")?,
            storage_path: get_heapless_string(row, "storage_path")?,
            checksum: get_heapless_string(row, "checksum")?,
            version: row.try_get("version")?,
            uploaded_by: get_heapless_string(row, "uploaded_by")?,
            uploaded_at: row.try_get("uploaded_at")?,
        })
    }
}

#[async_trait]
impl DocumentRepository for DocumentRepositoryImpl {
    async fn create_versioned(&self, document: NewDocument) -> RepositoryResult<DocumentModel> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

        // Serialize concurrent uploads to the same assignment: the row lock
        // makes count-then-insert atomic, keeping versions gap-free.
        let locked = sqlx::query("SELECT id FROM employee_documents WHERE id = $1 FOR UPDATE")
            .bind(document.assignment_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;
        if locked.is_none() {
            return Err(RepositoryError::backend(format!(
                "assignment {} does not exist",
                document.assignment_id
            )));
        }

        let count: i64 =
            sqlx::query("SELECT COUNT(*) AS total FROM documents WHERE employee_document_id = $1")
                .bind(document.assignment_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(map_sqlx_err)?
                .try_get("total")
                .map_err(|e| RepositoryError::backend(e))?;
        let version = (count + 1) as i32;

        sqlx::query(
            r#"
            INSERT INTO documents
            (id, employee_document_id, file_name, mime_type, storage_path, checksum, version, uploaded_by, uploaded_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(document.id)
        .bind(document.assignment_id)
        .bind(document.file_name.as_str())
        .bind(document.mime_type.as_str())
        .bind(document.storage_path.as_str())
        .bind(document.checksum.as_str())
        .bind(version)
        .bind(document.uploaded_by.as_str())
        .bind(document.uploaded_at)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_err)?;

        tx.commit().await.map_err(map_sqlx_err)?;
        Ok(document.into_model(version))
    }

    async fn count_for_assignment(&self, assignment_id: Uuid) -> RepositoryResult<i64> {
        sqlx::query("SELECT COUNT(*) AS total FROM documents WHERE employee_document_id = $1")
            .bind(assignment_id)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_err)?
            .try_get("total")
            .map_err(|e| RepositoryError::backend(e))
    }

    async fn list_for_assignment(
        &self,
        assignment_id: Uuid,
    ) -> RepositoryResult<Vec<DocumentModel>> {
        let rows = sqlx::query(
            "SELECT * FROM documents WHERE employee_document_id = $1 ORDER BY version",
        )
        .bind(assignment_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        rows.iter()
            .map(DocumentModel::try_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::Backend)
    }
}

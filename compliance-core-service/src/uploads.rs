use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use compliance_core_api::domain::commands::UploadCommand;
use compliance_core_api::error::{ApiError, ApiResult};
use compliance_core_db::models::document::{DocumentModel, NewDocument};
use compliance_core_db::repository::assignment_repository::AssignmentRepository;
use compliance_core_db::repository::document_repository::DocumentRepository;
use compliance_core_db::repository::employee_repository::EmployeeRepository;
use compliance_core_storage::backend::StorageBackend;

use crate::convert::{bounded, map_repo_err};

/// Upload and versioning engine.
///
/// Accepts a file for an (employee, document type) pair, stores the bytes,
/// records a checksummed, versioned document row and moves the assignment
/// to `Sent`.
pub struct UploadService {
    employees: Arc<dyn EmployeeRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    documents: Arc<dyn DocumentRepository>,
    storage: Arc<dyn StorageBackend>,
}

impl UploadService {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        documents: Arc<dyn DocumentRepository>,
        storage: Arc<dyn StorageBackend>,
    ) -> Self {
        Self {
            employees,
            assignments,
            documents,
            storage,
        }
    }

    pub async fn upload(
        &self,
        employee_id: Uuid,
        document_type_id: Uuid,
        cmd: UploadCommand,
    ) -> ApiResult<DocumentModel> {
        if cmd.bytes.is_empty() {
            return Err(ApiError::UnsupportedMediaType("File is required".to_string()));
        }

        self.employees
            .find_by_id(employee_id)
            .await
            .map_err(map_repo_err)?
            .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))?;

        let assignment = self
            .assignments
            .find_by_pair(employee_id, document_type_id)
            .await
            .map_err(map_repo_err)?
            .ok_or_else(|| {
                ApiError::NotFound("Employee is not assigned to this document type".to_string())
            })?;

        let stored = self
            .storage
            .save(&cmd.bytes, &cmd.file_name, &cmd.mime_type)
            .await
            .map_err(|e| ApiError::InternalError(e.to_string()))?;

        let checksum = sha256_hex(&cmd.bytes);
        let now = Utc::now();
        let document = NewDocument {
            id: Uuid::new_v4(),
            assignment_id: assignment.id,
            file_name: bounded(&stored.filename, "file_name")?,
            mime_type: bounded(&stored.mime_type, "mime_type")?,
            storage_path: bounded(&stored.id, "storage_path")?,
            checksum: bounded(&checksum, "checksum")?,
            uploaded_by: bounded(&cmd.uploaded_by, "uploaded_by")?,
            uploaded_at: now,
        };

        // The storage write and the database insert are not one
        // transaction. If the insert fails the stored file is deleted
        // again, best effort, so a failed upload does not strand bytes.
        let created = match self.documents.create_versioned(document).await {
            Ok(created) => created,
            Err(e) => {
                if let Err(cleanup) = self.storage.delete(&stored.id).await {
                    warn!(
                        storage_id = %stored.id,
                        error = %cleanup,
                        "failed to clean up stored file after insert failure"
                    );
                }
                return Err(map_repo_err(e));
            }
        };

        // Forward-only: Pending -> Sent, never back.
        self.assignments
            .mark_sent(assignment.id, now)
            .await
            .map_err(map_repo_err)?;

        info!(
            employee_id = %employee_id,
            document_type_id = %document_type_id,
            version = created.version,
            "document uploaded"
        );
        Ok(created)
    }
}

/// Hex-encoded SHA-256 digest of the payload.
fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Database model for one uploaded artifact of an assignment.
///
/// Immutable once created: re-uploading the same document type appends a
/// new row with the next version, it never overwrites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentModel {
    pub id: Uuid,

    /// Owning assignment; documents never outlive it.
    pub assignment_id: Uuid,

    /// Server-assigned file name (token + original extension).
    pub file_name: HeaplessString<255>,

    pub mime_type: HeaplessString<100>,

    /// Opaque id handed back by the storage backend.
    pub storage_path: HeaplessString<255>,

    /// Hex-encoded SHA-256 of the raw bytes, for integrity/audit.
    pub checksum: HeaplessString<64>,

    /// 1-based, gap-free per assignment.
    pub version: i32,

    pub uploaded_by: HeaplessString<100>,
    pub uploaded_at: DateTime<Utc>,
}

/// A document row waiting for its version number.
///
/// The version is assigned by the repository at insert time so that
/// concurrent uploads to the same assignment cannot observe the same
/// count. Everything else is fixed by the upload engine beforehand.
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub file_name: HeaplessString<255>,
    pub mime_type: HeaplessString<100>,
    pub storage_path: HeaplessString<255>,
    pub checksum: HeaplessString<64>,
    pub uploaded_by: HeaplessString<100>,
    pub uploaded_at: DateTime<Utc>,
}

impl NewDocument {
    /// Materializes the final row once the repository has picked a version.
    pub fn into_model(self, version: i32) -> DocumentModel {
        DocumentModel {
            id: self.id,
            assignment_id: self.assignment_id,
            file_name: self.file_name,
            mime_type: self.mime_type,
            storage_path: self.storage_path,
            checksum: self.checksum,
            version,
            uploaded_by: self.uploaded_by,
            uploaded_at: self.uploaded_at,
        }
    }
}

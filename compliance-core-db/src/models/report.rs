use chrono::{DateTime, NaiveDate, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::assignment::AssignmentStatus;

/// One row of the paginated assignment listing.
///
/// Employee and document-type names are denormalized at query time for
/// display convenience; the raw ids travel alongside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentListRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: HeaplessString<100>,
    pub document_type_id: Uuid,
    pub document_type_name: HeaplessString<100>,
    pub status: AssignmentStatus,
    pub due_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Per-document-type entry of an employee's compliance status report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentStatusRow {
    pub document_type_id: Uuid,
    pub document_type_name: HeaplessString<100>,
    pub status: AssignmentStatus,
    pub sent_at: Option<DateTime<Utc>>,
}

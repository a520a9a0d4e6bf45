use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Database model for a document type in the compliance catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTypeModel {
    pub id: Uuid,

    /// Short unique code, e.g. `CPF`, `CTPS`, `ASO`.
    pub code: HeaplessString<30>,

    pub name: HeaplessString<100>,
    pub description: Option<HeaplessString<255>>,

    /// How long an uploaded document stays valid, when the type expires.
    pub validity_period_months: Option<i32>,

    /// Mandatory types feed compliance reporting for every employee.
    pub is_mandatory: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

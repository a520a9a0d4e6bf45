use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Database model for the compliance status of an assignment.
///
/// Only `Pending -> Sent` is exercised today (a successful upload moves the
/// link forward, never back). `Approved`/`Rejected` are reserved for the
/// review workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "assignment_status", rename_all = "PascalCase")]
pub enum AssignmentStatus {
    Pending,
    Sent,
    Approved,
    Rejected,
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Pending => write!(f, "Pending"),
            AssignmentStatus::Sent => write!(f, "Sent"),
            AssignmentStatus::Approved => write!(f, "Approved"),
            AssignmentStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(AssignmentStatus::Pending),
            "Sent" => Ok(AssignmentStatus::Sent),
            "Approved" => Ok(AssignmentStatus::Approved),
            "Rejected" => Ok(AssignmentStatus::Rejected),
            _ => Err(()),
        }
    }
}

/// Database model for an employee/document-type link.
///
/// At most one assignment exists per (employee_id, document_type_id) pair,
/// enforced by a unique index. The assignment owns its uploaded documents;
/// deleting it cascades to them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentModel {
    pub id: Uuid,

    pub employee_id: Uuid,
    pub document_type_id: Uuid,

    pub status: AssignmentStatus,

    /// Set on the first successful upload, never cleared afterwards.
    pub sent_at: Option<DateTime<Utc>>,

    pub due_date: Option<NaiveDate>,
    pub expiration_date: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssignmentModel {
    /// Fresh pending link between an employee and a document type.
    pub fn pending(employee_id: Uuid, document_type_id: Uuid, now: DateTime<Utc>) -> Self {
        AssignmentModel {
            id: Uuid::new_v4(),
            employee_id,
            document_type_id,
            status: AssignmentStatus::Pending,
            sent_at: None,
            due_date: None,
            expiration_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}

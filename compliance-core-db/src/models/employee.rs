use chrono::{DateTime, NaiveDate, Utc};
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Database model for an employee.
///
/// `cpf` always holds the normalized 11-digit form; normalization and
/// validation happen before a model is ever constructed. Employees are
/// never hard-deleted, `is_active` flags retirement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeModel {
    pub id: Uuid,

    pub name: HeaplessString<100>,

    /// Normalized national id: exactly 11 digits, unique.
    pub cpf: HeaplessString<11>,

    /// Internal badge/registration number, unique when present.
    pub registration_number: Option<HeaplessString<30>>,

    pub email: Option<HeaplessString<100>>,
    pub phone: Option<HeaplessString<20>>,
    pub birth_date: Option<NaiveDate>,
    pub position: Option<HeaplessString<60>>,
    pub hired_at: NaiveDate,

    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field-wise patch applied by [`EmployeeRepository::update`].
///
/// `None` means "leave unchanged"; `cpf`, when present, is already
/// normalized.
///
/// [`EmployeeRepository::update`]: crate::repository::employee_repository::EmployeeRepository::update
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub name: Option<HeaplessString<100>>,
    pub cpf: Option<HeaplessString<11>>,
    pub registration_number: Option<HeaplessString<30>>,
    pub email: Option<HeaplessString<100>>,
    pub phone: Option<HeaplessString<20>>,
    pub birth_date: Option<NaiveDate>,
    pub position: Option<HeaplessString<60>>,
    pub hired_at: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl EmployeeModel {
    /// Applies a patch in place and bumps `updated_at`.
    ///
    /// Shared by the in-memory double and kept next to the model so the
    /// Postgres implementation and the tests agree on the semantics.
    pub fn apply(&mut self, changes: &EmployeeChanges, now: DateTime<Utc>) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(cpf) = &changes.cpf {
            self.cpf = cpf.clone();
        }
        if let Some(registration_number) = &changes.registration_number {
            self.registration_number = Some(registration_number.clone());
        }
        if let Some(email) = &changes.email {
            self.email = Some(email.clone());
        }
        if let Some(phone) = &changes.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(birth_date) = changes.birth_date {
            self.birth_date = Some(birth_date);
        }
        if let Some(position) = &changes.position {
            self.position = Some(position.clone());
        }
        if let Some(hired_at) = changes.hired_at {
            self.hired_at = hired_at;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
    }
}

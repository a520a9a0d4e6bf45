use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use compliance_core_api::domain::commands::{check, CreateEmployeeCommand, UpdateEmployeeCommand};
use compliance_core_api::domain::cpf::normalize_cpf;
use compliance_core_api::error::{ApiError, ApiResult, ConflictField};
use compliance_core_db::models::employee::{EmployeeChanges, EmployeeModel};
use compliance_core_db::repository::employee_repository::EmployeeRepository;

use crate::convert::{bounded, bounded_opt, map_repo_err};

/// Employee registry: create and update, with CPF normalization and
/// uniqueness handling.
pub struct EmployeeService {
    repo: Arc<dyn EmployeeRepository>,
}

impl EmployeeService {
    pub fn new(repo: Arc<dyn EmployeeRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, cmd: CreateEmployeeCommand) -> ApiResult<EmployeeModel> {
        check(&cmd)?;
        let cpf = normalize_cpf(&cmd.cpf)?;

        // Pre-check for a friendlier conflict; the unique index still
        // backs this up under races.
        if self
            .repo
            .find_by_cpf(&cpf)
            .await
            .map_err(map_repo_err)?
            .is_some()
        {
            return Err(ApiError::conflict(
                ConflictField::EmployeeCpf,
                "There is already an employee with this CPF.",
            ));
        }

        let now = Utc::now();
        let employee = EmployeeModel {
            id: Uuid::new_v4(),
            name: bounded(&cmd.name, "name")?,
            cpf: bounded(&cpf, "cpf")?,
            registration_number: bounded_opt(
                cmd.registration_number.as_deref(),
                "registration_number",
            )?,
            email: bounded_opt(cmd.email.as_deref(), "email")?,
            phone: bounded_opt(cmd.phone.as_deref(), "phone")?,
            birth_date: cmd.birth_date,
            position: bounded_opt(cmd.position.as_deref(), "position")?,
            hired_at: cmd.hired_at,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let saved = self.repo.create(employee).await.map_err(map_repo_err)?;
        info!(employee_id = %saved.id, "employee created");
        Ok(saved)
    }

    pub async fn update(&self, id: Uuid, cmd: UpdateEmployeeCommand) -> ApiResult<EmployeeModel> {
        check(&cmd)?;

        let cpf = match cmd.cpf.as_deref() {
            Some(raw) => Some(bounded(&normalize_cpf(raw)?, "cpf")?),
            None => None,
        };

        let changes = EmployeeChanges {
            name: bounded_opt(cmd.name.as_deref(), "name")?,
            cpf,
            registration_number: bounded_opt(
                cmd.registration_number.as_deref(),
                "registration_number",
            )?,
            email: bounded_opt(cmd.email.as_deref(), "email")?,
            phone: bounded_opt(cmd.phone.as_deref(), "phone")?,
            birth_date: cmd.birth_date,
            position: bounded_opt(cmd.position.as_deref(), "position")?,
            hired_at: cmd.hired_at,
            is_active: cmd.is_active,
        };

        self.repo
            .update(id, changes)
            .await
            .map_err(map_repo_err)?
            .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))
    }
}

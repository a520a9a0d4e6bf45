use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use std::error::Error;
use uuid::Uuid;

use compliance_core_db::models::employee::{EmployeeChanges, EmployeeModel};
use compliance_core_db::repository::employee_repository::EmployeeRepository;
use compliance_core_db::repository::error::{RepositoryError, RepositoryResult};

use crate::utils::{get_heapless_string, get_optional_heapless_string, map_sqlx_err, TryFromRow};

pub struct EmployeeRepositoryImpl {
    pool: PgPool,
}

impl EmployeeRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for EmployeeModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        use sqlx::Row;
        Ok(EmployeeModel {
            id: row.try_get("id")?,
            name: get_heapless_string(row, "name")?,
            cpf: get_heapless_string(row, "cpf")?,
            registration_number: get_optional_heapless_string(row, "registration_number")?,
            email: get_optional_heapless_string(row, "email")?,
            phone: get_optional_heapless_string(row, "phone")?,
            birth_date: row.try_get("birth_date")?,
            position: get_optional_heapless_string(row, "position")?,
            hired_at: row.try_get("hired_at")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

const INSERT_EMPLOYEE: &str = r#"
    INSERT INTO employees
    (id, name, cpf, registration_number, email, phone, birth_date, position, hired_at, is_active, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
"#;

const UPDATE_EMPLOYEE: &str = r#"
    UPDATE employees
    SET name = $2, cpf = $3, registration_number = $4, email = $5, phone = $6,
        birth_date = $7, position = $8, hired_at = $9, is_active = $10, updated_at = $11
    WHERE id = $1
"#;

#[async_trait]
impl EmployeeRepository for EmployeeRepositoryImpl {
    async fn create(&self, employee: EmployeeModel) -> RepositoryResult<EmployeeModel> {
        sqlx::query(INSERT_EMPLOYEE)
            .bind(employee.id)
            .bind(employee.name.as_str())
            .bind(employee.cpf.as_str())
            .bind(employee.registration_number.as_deref())
            .bind(employee.email.as_deref())
            .bind(employee.phone.as_deref())
            .bind(employee.birth_date)
            .bind(employee.position.as_deref())
            .bind(employee.hired_at)
            .bind(employee.is_active)
            .bind(employee.created_at)
            .bind(employee.updated_at)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        Ok(employee)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: EmployeeChanges,
    ) -> RepositoryResult<Option<EmployeeModel>> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

        let row = sqlx::query("SELECT * FROM employees WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut employee = EmployeeModel::try_from_row(&row).map_err(RepositoryError::Backend)?;
        employee.apply(&changes, Utc::now());

        sqlx::query(UPDATE_EMPLOYEE)
            .bind(employee.id)
            .bind(employee.name.as_str())
            .bind(employee.cpf.as_str())
            .bind(employee.registration_number.as_deref())
            .bind(employee.email.as_deref())
            .bind(employee.phone.as_deref())
            .bind(employee.birth_date)
            .bind(employee.position.as_deref())
            .bind(employee.hired_at)
            .bind(employee.is_active)
            .bind(employee.updated_at)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;

        tx.commit().await.map_err(map_sqlx_err)?;
        Ok(Some(employee))
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<EmployeeModel>> {
        let row = sqlx::query("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        row.as_ref()
            .map(EmployeeModel::try_from_row)
            .transpose()
            .map_err(RepositoryError::Backend)
    }

    async fn find_by_cpf(&self, cpf: &str) -> RepositoryResult<Option<EmployeeModel>> {
        let row = sqlx::query("SELECT * FROM employees WHERE cpf = $1")
            .bind(cpf)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        row.as_ref()
            .map(EmployeeModel::try_from_row)
            .transpose()
            .map_err(RepositoryError::Backend)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::{connect_test_pool, test_employee};
    use compliance_core_db::repository::employee_repository::EmployeeRepository;
    use compliance_core_db::repository::error::RepositoryError;
    use compliance_core_api::error::ConflictField;

    use super::EmployeeRepositoryImpl;

    #[tokio::test]
    #[ignore = "requires a running Postgres (DATABASE_URL)"]
    async fn create_and_find_round_trip() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let pool = connect_test_pool().await?;
        let repo = EmployeeRepositoryImpl::new(pool);

        let employee = test_employee();
        let saved = repo.create(employee.clone()).await?;
        assert_eq!(saved.id, employee.id);

        let found = repo.find_by_cpf(employee.cpf.as_str()).await?;
        assert_eq!(found.map(|e| e.id), Some(employee.id));
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running Postgres (DATABASE_URL)"]
    async fn duplicate_cpf_is_a_typed_conflict() -> Result<(), Box<dyn std::error::Error + Send + Sync>>
    {
        let pool = connect_test_pool().await?;
        let repo = EmployeeRepositoryImpl::new(pool);

        let first = test_employee();
        repo.create(first.clone()).await?;

        let mut second = test_employee();
        second.cpf = first.cpf.clone();
        match repo.create(second).await {
            Err(RepositoryError::UniqueViolation(ConflictField::EmployeeCpf)) => Ok(()),
            other => panic!("expected cpf conflict, got {other:?}"),
        }
    }
}

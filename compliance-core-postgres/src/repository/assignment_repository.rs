use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, QueryBuilder, Row};
use std::error::Error;
use uuid::Uuid;

use compliance_core_db::models::assignment::{AssignmentModel, AssignmentStatus};
use compliance_core_db::models::report::{AssignmentListRow, AssignmentStatusRow};
use compliance_core_db::repository::assignment_repository::AssignmentRepository;
use compliance_core_db::repository::error::{RepositoryError, RepositoryResult};
use compliance_core_db::repository::filter::{AssignmentFilter, OrderField, SortOrder};
use compliance_core_db::repository::pagination::{Page, PageRequest};

use crate::utils::{get_heapless_string, map_sqlx_err, TryFromRow};

pub struct AssignmentRepositoryImpl {
    pool: PgPool,
}

impl AssignmentRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TryFromRow<PgRow> for AssignmentModel {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(AssignmentModel {
            id: row.try_get("id")?,
            employee_id: row.try_get("employee_id")?,
            document_type_id: row.try_get("document_type_id")?,
            status: row.try_get("status")?,
            sent_at: row.try_get("sent_at")?,
            due_date: row.try_get("due_date")?,
            expiration_date: row.try_get("expiration_date")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl TryFromRow<PgRow> for AssignmentListRow {
    fn try_from_row(row: &PgRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(AssignmentListRow {
            id: row.try_get("id")?,
            employee_id: row.try_get("employee_id")?,
            employee_name: get_heapless_string(row, "employee_name")?,
            document_type_id: row.try_get("document_type_id")?,
            document_type_name: get_heapless_string(row, "document_type_name")?,
            status: row.try_get("status")?,
            due_date: row.try_get("due_date")?,
            expiration_date: row.try_get("expiration_date")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// Column behind each orderable field; values come from a closed enum, so
/// splicing them into SQL is safe.
fn order_column(field: OrderField) -> &'static str {
    match field {
        OrderField::UpdatedAt => "ed.updated_at",
        OrderField::CreatedAt => "ed.created_at",
        OrderField::Status => "ed.status",
        OrderField::DueDate => "ed.due_date",
        OrderField::ExpirationDate => "ed.expiration_date",
    }
}

fn order_direction(order: SortOrder) -> &'static str {
    match order {
        SortOrder::Asc => "ASC",
        SortOrder::Desc => "DESC",
    }
}

/// Appends the conjunctive WHERE predicates shared by the page and the
/// count query.
fn push_filters(builder: &mut QueryBuilder<'_, sqlx::Postgres>, filter: &AssignmentFilter) {
    if let Some(employee_id) = filter.employee_id {
        builder.push(" AND ed.employee_id = ");
        builder.push_bind(employee_id);
    }
    if let Some(document_type_id) = filter.document_type_id {
        builder.push(" AND ed.document_type_id = ");
        builder.push_bind(document_type_id);
    }
    if let Some(status) = filter.status {
        builder.push(" AND ed.status = ");
        builder.push_bind(status);
    }
    if let Some(search) = &filter.search {
        builder.push(" AND e.name ILIKE ");
        builder.push_bind(format!("%{search}%"));
    }
}

const LIST_FROM: &str = r#"
    FROM employee_documents ed
    JOIN employees e ON e.id = ed.employee_id
    JOIN document_types dt ON dt.id = ed.document_type_id
    WHERE 1 = 1
"#;

#[async_trait]
impl AssignmentRepository for AssignmentRepositoryImpl {
    async fn create(&self, assignment: AssignmentModel) -> RepositoryResult<AssignmentModel> {
        sqlx::query(
            r#"
            INSERT INTO employee_documents
            (id, employee_id, document_type_id, status, sent_at, due_date, expiration_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(assignment.id)
        .bind(assignment.employee_id)
        .bind(assignment.document_type_id)
        .bind(assignment.status)
        .bind(assignment.sent_at)
        .bind(assignment.due_date)
        .bind(assignment.expiration_date)
        .bind(assignment.created_at)
        .bind(assignment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(assignment)
    }

    async fn find_by_pair(
        &self,
        employee_id: Uuid,
        document_type_id: Uuid,
    ) -> RepositoryResult<Option<AssignmentModel>> {
        let row = sqlx::query(
            "SELECT * FROM employee_documents WHERE employee_id = $1 AND document_type_id = $2",
        )
        .bind(employee_id)
        .bind(document_type_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        row.as_ref()
            .map(AssignmentModel::try_from_row)
            .transpose()
            .map_err(RepositoryError::Backend)
    }

    async fn delete_by_pair(
        &self,
        employee_id: Uuid,
        document_type_id: Uuid,
    ) -> RepositoryResult<Option<AssignmentModel>> {
        // Documents cascade via the foreign key.
        let row = sqlx::query(
            r#"
            DELETE FROM employee_documents
            WHERE employee_id = $1 AND document_type_id = $2
            RETURNING *
            "#,
        )
        .bind(employee_id)
        .bind(document_type_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        row.as_ref()
            .map(AssignmentModel::try_from_row)
            .transpose()
            .map_err(RepositoryError::Backend)
    }

    async fn mark_sent(
        &self,
        assignment_id: Uuid,
        sent_at: DateTime<Utc>,
    ) -> RepositoryResult<()> {
        sqlx::query(
            r#"
            UPDATE employee_documents
            SET status = $2, sent_at = $3, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(assignment_id)
        .bind(AssignmentStatus::Sent)
        .bind(sent_at)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;
        Ok(())
    }

    async fn status_rows(&self, employee_id: Uuid) -> RepositoryResult<Vec<AssignmentStatusRow>> {
        let rows = sqlx::query(
            r#"
            SELECT ed.document_type_id, dt.name AS document_type_name, ed.status, ed.sent_at
            FROM employee_documents ed
            JOIN document_types dt ON dt.id = ed.document_type_id
            WHERE ed.employee_id = $1
            ORDER BY dt.name
            "#,
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        rows.iter()
            .map(|row| {
                Ok(AssignmentStatusRow {
                    document_type_id: row.try_get("document_type_id")?,
                    document_type_name: get_heapless_string(row, "document_type_name")?,
                    status: row.try_get("status")?,
                    sent_at: row.try_get("sent_at")?,
                })
            })
            .collect::<Result<Vec<_>, Box<dyn Error + Send + Sync>>>()
            .map_err(RepositoryError::Backend)
    }

    async fn find_page(
        &self,
        filter: &AssignmentFilter,
        order_by: OrderField,
        order: SortOrder,
        page: PageRequest,
    ) -> RepositoryResult<Page<AssignmentListRow>> {
        let mut count_builder = QueryBuilder::new("SELECT COUNT(*) AS total");
        count_builder.push(LIST_FROM);
        push_filters(&mut count_builder, filter);
        let total: i64 = count_builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_err)?
            .try_get("total")
            .map_err(|e| RepositoryError::backend(e))?;

        let mut builder = QueryBuilder::new(
            r#"
            SELECT ed.id, ed.employee_id, e.name AS employee_name,
                   ed.document_type_id, dt.name AS document_type_name,
                   ed.status, ed.due_date, ed.expiration_date, ed.created_at, ed.updated_at
            "#,
        );
        builder.push(LIST_FROM);
        push_filters(&mut builder, filter);
        builder.push(format!(
            " ORDER BY {} {}",
            order_column(order_by),
            order_direction(order)
        ));
        builder.push(" LIMIT ");
        builder.push_bind(page.limit as i64);
        builder.push(" OFFSET ");
        builder.push_bind(page.offset as i64);

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_err)?;
        let items = rows
            .iter()
            .map(AssignmentListRow::try_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(RepositoryError::Backend)?;

        Ok(Page::new(items, total as usize, page.limit, page.offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_columns_are_prefixed() {
        assert_eq!(order_column(OrderField::UpdatedAt), "ed.updated_at");
        assert_eq!(order_column(OrderField::Status), "ed.status");
        assert_eq!(order_direction(SortOrder::Asc), "ASC");
        assert_eq!(order_direction(SortOrder::Desc), "DESC");
    }

    #[test]
    fn filters_become_conjunctive_predicates() {
        let mut builder: QueryBuilder<'_, sqlx::Postgres> = QueryBuilder::new("WHERE 1 = 1");
        let filter = AssignmentFilter {
            employee_id: Some(Uuid::new_v4()),
            document_type_id: None,
            status: Some(AssignmentStatus::Pending),
            search: Some("maria".to_string()),
        };
        push_filters(&mut builder, &filter);
        let sql = builder.sql();
        assert!(sql.contains("ed.employee_id = $1"));
        assert!(!sql.contains("document_type_id"));
        assert!(sql.contains("ed.status = $2"));
        assert!(sql.contains("e.name ILIKE $3"));
    }
}

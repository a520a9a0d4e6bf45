use sqlx::PgPool;
use std::sync::Arc;

use compliance_core_db::repository::assignment_repository::AssignmentRepository;
use compliance_core_db::repository::document_repository::DocumentRepository;
use compliance_core_db::repository::document_type_repository::DocumentTypeRepository;
use compliance_core_db::repository::employee_repository::EmployeeRepository;

use crate::repository::{
    AssignmentRepositoryImpl, DocumentRepositoryImpl, DocumentTypeRepositoryImpl,
    EmployeeRepositoryImpl,
};

/// One stop for every Postgres-backed repository, all sharing a pool.
pub struct PostgresRepositories {
    pub employees: Arc<dyn EmployeeRepository>,
    pub document_types: Arc<dyn DocumentTypeRepository>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub documents: Arc<dyn DocumentRepository>,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            employees: Arc::new(EmployeeRepositoryImpl::new(pool.clone())),
            document_types: Arc::new(DocumentTypeRepositoryImpl::new(pool.clone())),
            assignments: Arc::new(AssignmentRepositoryImpl::new(pool.clone())),
            documents: Arc::new(DocumentRepositoryImpl::new(pool)),
        }
    }
}

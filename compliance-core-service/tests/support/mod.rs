//! In-memory double of the persistence layer for service tests.
//!
//! One shared [`MemoryDb`] implements all four repository traits over a
//! single mutex-guarded state, mirroring the uniqueness and cascade rules
//! the SQL schema enforces.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use compliance_core_api::domain::commands::{CreateDocumentTypeCommand, CreateEmployeeCommand};
use compliance_core_api::error::ConflictField;
use compliance_core_db::models::assignment::AssignmentModel;
use compliance_core_db::models::document::{DocumentModel, NewDocument};
use compliance_core_db::models::document_type::DocumentTypeModel;
use compliance_core_db::models::employee::{EmployeeChanges, EmployeeModel};
use compliance_core_db::models::report::{AssignmentListRow, AssignmentStatusRow};
use compliance_core_db::repository::assignment_repository::AssignmentRepository;
use compliance_core_db::repository::document_repository::DocumentRepository;
use compliance_core_db::repository::document_type_repository::DocumentTypeRepository;
use compliance_core_db::repository::employee_repository::EmployeeRepository;
use compliance_core_db::repository::error::{RepositoryError, RepositoryResult};
use compliance_core_db::repository::filter::{AssignmentFilter, OrderField, SortOrder};
use compliance_core_db::repository::pagination::{Page, PageRequest};

#[derive(Default)]
struct State {
    employees: HashMap<Uuid, EmployeeModel>,
    document_types: HashMap<Uuid, DocumentTypeModel>,
    assignments: HashMap<Uuid, AssignmentModel>,
    documents: HashMap<Uuid, DocumentModel>,
}

#[derive(Default)]
pub struct MemoryDb {
    state: Mutex<State>,
}

impl MemoryDb {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn document_count(&self, assignment_id: Uuid) -> usize {
        let state = self.state.lock().unwrap();
        state
            .documents
            .values()
            .filter(|d| d.assignment_id == assignment_id)
            .count()
    }
}

#[async_trait]
impl EmployeeRepository for MemoryDb {
    async fn create(&self, employee: EmployeeModel) -> RepositoryResult<EmployeeModel> {
        let mut state = self.state.lock().unwrap();
        if state.employees.values().any(|e| e.cpf == employee.cpf) {
            return Err(RepositoryError::UniqueViolation(ConflictField::EmployeeCpf));
        }
        if let Some(reg) = &employee.registration_number {
            if state
                .employees
                .values()
                .any(|e| e.registration_number.as_ref() == Some(reg))
            {
                return Err(RepositoryError::UniqueViolation(
                    ConflictField::EmployeeRegistrationNumber,
                ));
            }
        }
        state.employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn update(
        &self,
        id: Uuid,
        changes: EmployeeChanges,
    ) -> RepositoryResult<Option<EmployeeModel>> {
        let mut state = self.state.lock().unwrap();
        if !state.employees.contains_key(&id) {
            return Ok(None);
        }
        if let Some(cpf) = &changes.cpf {
            if state
                .employees
                .values()
                .any(|e| e.id != id && &e.cpf == cpf)
            {
                return Err(RepositoryError::UniqueViolation(ConflictField::EmployeeCpf));
            }
        }
        if let Some(reg) = &changes.registration_number {
            if state
                .employees
                .values()
                .any(|e| e.id != id && e.registration_number.as_ref() == Some(reg))
            {
                return Err(RepositoryError::UniqueViolation(
                    ConflictField::EmployeeRegistrationNumber,
                ));
            }
        }
        let employee = state.employees.get_mut(&id).unwrap();
        employee.apply(&changes, Utc::now());
        Ok(Some(employee.clone()))
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<EmployeeModel>> {
        Ok(self.state.lock().unwrap().employees.get(&id).cloned())
    }

    async fn find_by_cpf(&self, cpf: &str) -> RepositoryResult<Option<EmployeeModel>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .employees
            .values()
            .find(|e| e.cpf.as_str() == cpf)
            .cloned())
    }
}

#[async_trait]
impl DocumentTypeRepository for MemoryDb {
    async fn create(
        &self,
        document_type: DocumentTypeModel,
    ) -> RepositoryResult<DocumentTypeModel> {
        let mut state = self.state.lock().unwrap();
        if state
            .document_types
            .values()
            .any(|t| t.code == document_type.code)
        {
            return Err(RepositoryError::UniqueViolation(
                ConflictField::DocumentTypeCode,
            ));
        }
        state
            .document_types
            .insert(document_type.id, document_type.clone());
        Ok(document_type)
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<DocumentTypeModel>> {
        Ok(self.state.lock().unwrap().document_types.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> RepositoryResult<Option<DocumentTypeModel>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .document_types
            .values()
            .find(|t| t.code.as_str() == code)
            .cloned())
    }

    async fn list(&self) -> RepositoryResult<Vec<DocumentTypeModel>> {
        let mut types: Vec<_> = self
            .state
            .lock()
            .unwrap()
            .document_types
            .values()
            .cloned()
            .collect();
        types.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(types)
    }
}

#[async_trait]
impl AssignmentRepository for MemoryDb {
    async fn create(&self, assignment: AssignmentModel) -> RepositoryResult<AssignmentModel> {
        let mut state = self.state.lock().unwrap();
        if state.assignments.values().any(|a| {
            a.employee_id == assignment.employee_id
                && a.document_type_id == assignment.document_type_id
        }) {
            return Err(RepositoryError::UniqueViolation(
                ConflictField::AssignmentPair,
            ));
        }
        state.assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    async fn find_by_pair(
        &self,
        employee_id: Uuid,
        document_type_id: Uuid,
    ) -> RepositoryResult<Option<AssignmentModel>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .assignments
            .values()
            .find(|a| a.employee_id == employee_id && a.document_type_id == document_type_id)
            .cloned())
    }

    async fn delete_by_pair(
        &self,
        employee_id: Uuid,
        document_type_id: Uuid,
    ) -> RepositoryResult<Option<AssignmentModel>> {
        let mut state = self.state.lock().unwrap();
        let id = state
            .assignments
            .values()
            .find(|a| a.employee_id == employee_id && a.document_type_id == document_type_id)
            .map(|a| a.id);
        let Some(id) = id else {
            return Ok(None);
        };
        let removed = state.assignments.remove(&id);
        // Cascade, as the schema's ON DELETE CASCADE would
        state.documents.retain(|_, d| d.assignment_id != id);
        Ok(removed)
    }

    async fn mark_sent(
        &self,
        assignment_id: Uuid,
        sent_at: DateTime<Utc>,
    ) -> RepositoryResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(assignment) = state.assignments.get_mut(&assignment_id) {
            assignment.status = compliance_core_db::models::assignment::AssignmentStatus::Sent;
            assignment.sent_at = Some(sent_at);
            assignment.updated_at = sent_at;
        }
        Ok(())
    }

    async fn status_rows(&self, employee_id: Uuid) -> RepositoryResult<Vec<AssignmentStatusRow>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<_> = state
            .assignments
            .values()
            .filter(|a| a.employee_id == employee_id)
            .map(|a| {
                let document_type = &state.document_types[&a.document_type_id];
                AssignmentStatusRow {
                    document_type_id: a.document_type_id,
                    document_type_name: document_type.name.clone(),
                    status: a.status,
                    sent_at: a.sent_at,
                }
            })
            .collect();
        rows.sort_by(|a, b| a.document_type_name.cmp(&b.document_type_name));
        Ok(rows)
    }

    async fn find_page(
        &self,
        filter: &AssignmentFilter,
        order_by: OrderField,
        order: SortOrder,
        page: PageRequest,
    ) -> RepositoryResult<Page<AssignmentListRow>> {
        let state = self.state.lock().unwrap();
        let mut rows: Vec<AssignmentListRow> = state
            .assignments
            .values()
            .filter(|a| {
                filter.employee_id.map_or(true, |id| a.employee_id == id)
                    && filter
                        .document_type_id
                        .map_or(true, |id| a.document_type_id == id)
                    && filter.status.map_or(true, |s| a.status == s)
                    && filter.search.as_ref().map_or(true, |needle| {
                        state.employees[&a.employee_id]
                            .name
                            .to_lowercase()
                            .contains(&needle.to_lowercase())
                    })
            })
            .map(|a| AssignmentListRow {
                id: a.id,
                employee_id: a.employee_id,
                employee_name: state.employees[&a.employee_id].name.clone(),
                document_type_id: a.document_type_id,
                document_type_name: state.document_types[&a.document_type_id].name.clone(),
                status: a.status,
                due_date: a.due_date,
                expiration_date: a.expiration_date,
                created_at: a.created_at,
                updated_at: a.updated_at,
            })
            .collect();

        rows.sort_by(|a, b| {
            let ordering = match order_by {
                OrderField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                OrderField::CreatedAt => a.created_at.cmp(&b.created_at),
                OrderField::Status => a.status.to_string().cmp(&b.status.to_string()),
                OrderField::DueDate => a.due_date.cmp(&b.due_date),
                OrderField::ExpirationDate => a.expiration_date.cmp(&b.expiration_date),
            };
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = rows.len();
        let items: Vec<_> = rows
            .into_iter()
            .skip(page.offset)
            .take(page.limit)
            .collect();
        Ok(Page::new(items, total, page.limit, page.offset))
    }
}

#[async_trait]
impl DocumentRepository for MemoryDb {
    async fn create_versioned(&self, document: NewDocument) -> RepositoryResult<DocumentModel> {
        // The mutex serializes count-then-insert, like the row lock in SQL
        let mut state = self.state.lock().unwrap();
        if !state.assignments.contains_key(&document.assignment_id) {
            return Err(RepositoryError::backend(format!(
                "assignment {} does not exist",
                document.assignment_id
            )));
        }
        let count = state
            .documents
            .values()
            .filter(|d| d.assignment_id == document.assignment_id)
            .count();
        let model = document.into_model((count + 1) as i32);
        state.documents.insert(model.id, model.clone());
        Ok(model)
    }

    async fn count_for_assignment(&self, assignment_id: Uuid) -> RepositoryResult<i64> {
        Ok(self.document_count(assignment_id) as i64)
    }

    async fn list_for_assignment(
        &self,
        assignment_id: Uuid,
    ) -> RepositoryResult<Vec<DocumentModel>> {
        let mut documents: Vec<_> = self
            .state
            .lock()
            .unwrap()
            .documents
            .values()
            .filter(|d| d.assignment_id == assignment_id)
            .cloned()
            .collect();
        documents.sort_by_key(|d| d.version);
        Ok(documents)
    }
}

pub fn employee_command(name: &str, cpf: &str) -> CreateEmployeeCommand {
    CreateEmployeeCommand {
        name: name.to_string(),
        cpf: cpf.to_string(),
        registration_number: None,
        email: None,
        phone: None,
        birth_date: None,
        position: None,
        hired_at: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
    }
}

pub fn document_type_command(code: &str, name: &str) -> CreateDocumentTypeCommand {
    CreateDocumentTypeCommand {
        code: code.to_string(),
        name: name.to_string(),
        description: None,
        validity_period_months: None,
        is_mandatory: true,
    }
}

pub mod assignment_repository;
pub mod document_repository;
pub mod document_type_repository;
pub mod employee_repository;

pub use assignment_repository::AssignmentRepositoryImpl;
pub use document_repository::DocumentRepositoryImpl;
pub use document_type_repository::DocumentTypeRepositoryImpl;
pub use employee_repository::EmployeeRepositoryImpl;

pub mod assignment_repository;
pub mod document_repository;
pub mod document_type_repository;
pub mod employee_repository;
pub mod error;
pub mod filter;
pub mod pagination;

pub use assignment_repository::*;
pub use document_repository::*;
pub use document_type_repository::*;
pub use employee_repository::*;
pub use error::*;
pub use filter::*;
pub use pagination::*;

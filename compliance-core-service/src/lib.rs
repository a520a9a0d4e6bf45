pub mod assignments;
pub mod convert;
pub mod document_types;
pub mod employees;
pub mod status;
pub mod uploads;

pub use assignments::AssignmentService;
pub use document_types::DocumentTypeService;
pub use employees::EmployeeService;
pub use status::{StatusReport, StatusService};
pub use uploads::UploadService;

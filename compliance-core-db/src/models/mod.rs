pub mod assignment;
pub mod document;
pub mod document_type;
pub mod employee;
pub mod report;

pub use assignment::*;
pub use document::*;
pub use document_type::*;
pub use employee::*;
pub use report::*;

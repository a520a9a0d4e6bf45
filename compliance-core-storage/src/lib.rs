pub mod backend;
pub mod disk;
pub mod error;

pub use backend::*;
pub use disk::DiskStorage;
pub use error::*;

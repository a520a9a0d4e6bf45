pub mod commands;
pub mod cpf;

pub use commands::*;
pub use cpf::*;

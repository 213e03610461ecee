pub mod assemble;
pub mod ident;
pub mod resolve;

pub use assemble::build_model;

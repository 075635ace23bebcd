// dartnml/src/lib.rs

pub mod case;
pub mod cli;

pub use case::CaseValues;

// f90defaults/src/namelist/mod.rs

//! Ordered namelist templates: groups of variable settings, case reduction
//! and the `values`-wrapped YAML/JSON persistence format.

pub mod core;
pub mod group;
pub mod reduce;
pub mod serialization;

pub use self::core::NamelistTemplate;
pub use group::NamelistGroup;
pub use reduce::reduce;

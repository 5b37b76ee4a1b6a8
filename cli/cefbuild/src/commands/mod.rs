//! CLI command implementations.

pub mod configure;
pub mod doctor;
pub mod emit;
pub mod plan;
pub mod probe;

//! Virtual filesystem implementations

pub mod memory;
pub mod physical;

//! Command implementations

pub mod upgrade;

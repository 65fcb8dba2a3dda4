//! Command implementations.

pub mod agenda;
pub mod config;

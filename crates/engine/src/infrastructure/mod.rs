//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod config;
pub mod memory;
pub mod neo4j;
pub mod ports;
pub mod relational;

//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Graph access (Neo4j, or the in-memory graph)
//! - Id allocation (counter nodes in the graph)
//! - The relational source being migrated (SQLite)

mod error;
mod repos;
pub mod types;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{DeckGraphRepo, GraphMapper, IdAllocator, RelationalSource};

pub use types::{DeckGraph, OwnedDeck};

// =============================================================================
// Test-Only Mock Repositories (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockDeckGraphRepo, MockGraphMapper, MockIdAllocator, MockRelationalSource};

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;

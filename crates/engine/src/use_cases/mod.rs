//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across port traits to fulfill user stories.

pub mod deck;
pub mod migration;

// Re-export main types
pub use deck::{DeckError, DeckUseCases};
pub use migration::{Migrate, MigrationError, MigrationReport};

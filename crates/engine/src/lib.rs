//! Deckgraph Engine library.
//!
//! Graph-backed deck data access and the relational-to-graph migrator.
//!
//! ## Structure
//!
//! - `use_cases/` - Deck queries and mutations, the bulk importer
//! - `infrastructure/` - Port traits and their adapters (Neo4j, SQLite, in-memory)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;

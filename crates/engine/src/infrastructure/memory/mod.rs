//! In-memory adapters.

mod graph_store;

pub use graph_store::InMemoryGraph;

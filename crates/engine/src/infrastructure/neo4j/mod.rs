//! Neo4j database implementations.

use std::sync::Arc;

use neo4rs::Graph;

mod deck_repo;
mod graph;
mod helpers;
mod id_allocator;
mod mapper;
mod properties;
mod query_helpers;
mod schema;

#[cfg(test)]
pub(crate) mod test_harness;

#[cfg(test)]
mod integration_tests;

pub use deck_repo::Neo4jDeckRepo;
pub use graph::{Neo4jGraph, Neo4jRowStream};
pub use id_allocator::Neo4jIdAllocator;
pub use mapper::Neo4jGraphMapper;
pub use schema::ensure_schema;

/// Create all Neo4j repositories from a graph connection.
pub struct Neo4jRepositories {
    pub ids: Arc<Neo4jIdAllocator>,
    pub mapper: Arc<Neo4jGraphMapper>,
    pub decks: Arc<Neo4jDeckRepo>,
}

impl Neo4jRepositories {
    pub fn new(graph: Graph) -> Self {
        let graph = Neo4jGraph::new(graph);
        Self {
            ids: Arc::new(Neo4jIdAllocator::new(graph.clone())),
            mapper: Arc::new(Neo4jGraphMapper::new(graph.clone())),
            decks: Arc::new(Neo4jDeckRepo::new(graph)),
        }
    }
}

//! Neo4j id allocator.
//!
//! One counter node per label holds the last issued id:
//! - `(:IdCounter {label: "Deck", value: 41})`

use async_trait::async_trait;
use deckgraph_domain::NodeLabel;
use neo4rs::query;

use super::query_helpers::{fetch_count, run_query};
use crate::infrastructure::neo4j::Neo4jGraph;
use crate::infrastructure::ports::{IdAllocator, RepoError};

pub struct Neo4jIdAllocator {
    graph: Neo4jGraph,
}

impl Neo4jIdAllocator {
    pub fn new(graph: Neo4jGraph) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl IdAllocator for Neo4jIdAllocator {
    async fn next_id(&self, label: NodeLabel) -> Result<i64, RepoError> {
        // The SET takes a write lock on the counter node, so concurrent callers serialize.
        let q = query(
            "MERGE (c:IdCounter {label: $label})
            ON CREATE SET c.value = 0
            SET c.value = c.value + 1
            RETURN c.value AS id",
        )
        .param("label", label.as_str());

        let id = fetch_count(&self.graph, q, "id", "next_id").await?;
        if id == 0 {
            return Err(RepoError::database(
                "next_id",
                format!("counter for {} returned no value", label),
            ));
        }

        tracing::trace!(%label, id, "Allocated id");
        Ok(id)
    }

    async fn init_counter(&self, label: NodeLabel, start: i64) -> Result<(), RepoError> {
        let q = query(
            "MERGE (c:IdCounter {label: $label})
            SET c.value = $start",
        )
        .param("label", label.as_str())
        .param("start", start);

        run_query(&self.graph, q, "init_counter").await?;

        tracing::debug!(%label, next = start + 1, "Initialized id counter");
        Ok(())
    }
}

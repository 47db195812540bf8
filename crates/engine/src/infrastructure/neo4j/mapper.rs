//! Neo4j node and relationship mapper.
//!
//! Labels and relationship types come from closed enums and are interpolated
//! into the statement text; all values travel as parameters.

use async_trait::async_trait;
use deckgraph_domain::{GraphNode, NodeLabel, NodeRef, RelationType};
use neo4rs::{query, BoltType};

use super::properties::node_properties;
use super::query_helpers::{fetch_count, run_query};
use crate::infrastructure::neo4j::Neo4jGraph;
use crate::infrastructure::ports::{GraphMapper, RepoError};

pub struct Neo4jGraphMapper {
    graph: Neo4jGraph,
}

impl Neo4jGraphMapper {
    pub fn new(graph: Neo4jGraph) -> Self {
        Self { graph }
    }
}

/// `MATCH` both endpoints, `CREATE` the edge and report how many were made.
pub(super) fn relationship_query(from: NodeRef, to: NodeRef, relation: RelationType) -> neo4rs::Query {
    query(&format!(
        "MATCH (a:{from_label} {{id: $from_id}})
        MATCH (b:{to_label} {{id: $to_id}})
        CREATE (a)-[r:{relation}]->(b)
        RETURN count(r) AS created",
        from_label = from.label,
        to_label = to.label,
        relation = relation,
    ))
    .param("from_id", from.id)
    .param("to_id", to.id)
}

#[async_trait]
impl GraphMapper for Neo4jGraphMapper {
    async fn create_node(&self, node: &GraphNode) -> Result<(), RepoError> {
        let q = query(&format!("CREATE (n:{}) SET n = $props", node.label()))
            .param("props", node_properties(node));

        run_query(&self.graph, q, "create_node").await?;

        tracing::debug!(node = %node.node_ref(), "Created node");
        Ok(())
    }

    async fn create_nodes(&self, label: NodeLabel, nodes: &[GraphNode]) -> Result<(), RepoError> {
        if nodes.is_empty() {
            return Ok(());
        }
        if let Some(stray) = nodes.iter().find(|n| n.label() != label) {
            return Err(RepoError::database(
                "create_nodes",
                format!("{} does not belong in a {} batch", stray.node_ref(), label),
            ));
        }

        let rows: Vec<BoltType> = nodes
            .iter()
            .map(|node| BoltType::from(node_properties(node)))
            .collect();

        let q = query(&format!("UNWIND $rows AS row CREATE (n:{}) SET n = row", label))
            .param("rows", rows);

        run_query(&self.graph, q, "create_nodes").await?;

        tracing::debug!(%label, count = nodes.len(), "Created nodes");
        Ok(())
    }

    async fn create_relationship(
        &self,
        from: NodeRef,
        to: NodeRef,
        relation: RelationType,
    ) -> Result<(), RepoError> {
        let q = relationship_query(from, to, relation);
        let created = fetch_count(&self.graph, q, "created", "create_relationship").await?;

        if created == 0 {
            return Err(RepoError::endpoint_not_found(relation, from, to));
        }

        tracing::trace!(%from, %to, %relation, "Created relationship");
        Ok(())
    }
}

//! Neo4j schema initialization - constraints.

use deckgraph_domain::NodeLabel;
use neo4rs::query;

use crate::infrastructure::neo4j::Neo4jGraph;

/// Initialize Neo4j schema with required constraints.
///
/// This should be called once on startup. Constraints are created with
/// IF NOT EXISTS to be idempotent.
pub async fn ensure_schema(graph: &Neo4jGraph) -> Result<(), neo4rs::Error> {
    // Node ids are unique per label; the constraint also backs `{id: $id}` lookups.
    for label in NodeLabel::ALL {
        graph
            .run(query(&format!(
                "CREATE CONSTRAINT {name}_id_unique IF NOT EXISTS
                 FOR (n:{label}) REQUIRE n.id IS UNIQUE",
                name = label.as_str().to_lowercase(),
                label = label,
            )))
            .await?;
    }

    graph
        .run(query(
            "CREATE CONSTRAINT id_counter_label_unique IF NOT EXISTS
             FOR (c:IdCounter) REQUIRE c.label IS UNIQUE",
        ))
        .await?;

    tracing::info!("Neo4j schema initialized (id constraints ensured)");
    Ok(())
}

//! Deckgraph migrator - copies the relational card game store into Neo4j.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deckgraph_engine::infrastructure::{
    config::{load_dotenv_from_repo_root, EngineConfig},
    neo4j::{ensure_schema, Neo4jGraph, Neo4jRepositories},
    relational::SqliteRelationalSource,
};
use deckgraph_engine::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the binary may run from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deckgraph_engine=debug,deckgraph_migrate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Deckgraph migration");

    let config = EngineConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    // Connect to Neo4j
    let graph = neo4rs::Graph::new(&config.neo4j.uri, &config.neo4j.user, &config.neo4j.password)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to Neo4j at {}: {e}", config.neo4j.uri))?;
    tracing::info!(uri = %config.neo4j.uri, "Connected to Neo4j");

    ensure_schema(&Neo4jGraph::new(graph.clone())).await?;

    let source = SqliteRelationalSource::connect(&config.relational_db_url).await?;
    tracing::info!(url = %config.relational_db_url, "Opened relational store");

    let app = App::new(Neo4jRepositories::new(graph));
    let report = app.migration(Arc::new(source)).execute().await?;

    for (label, count) in &report.nodes {
        tracing::info!(%label, count, "Migrated nodes");
    }
    tracing::info!(
        nodes = report.total_nodes(),
        relationships = report.relationships,
        "Migration finished"
    );

    Ok(())
}

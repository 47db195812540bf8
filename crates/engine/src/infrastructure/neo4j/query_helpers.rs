//! Query helpers shared by the Neo4j adapters.
//!
//! Each helper takes the operation name that ends up in `RepoError::Database`.

use neo4rs::{Query, Row};

use crate::infrastructure::neo4j::Neo4jGraph;
use crate::infrastructure::ports::RepoError;

/// Execute a query and convert every returned row.
pub async fn collect_rows<T, F>(
    graph: &Neo4jGraph,
    query: Query,
    operation: &'static str,
    converter: F,
) -> Result<Vec<T>, RepoError>
where
    F: Fn(Row) -> Result<T, RepoError>,
{
    let mut result = graph
        .execute(query)
        .await
        .map_err(|e| RepoError::database(operation, e))?;

    let mut items = Vec::new();
    while let Some(row) = result
        .next()
        .await
        .map_err(|e| RepoError::database(operation, e))?
    {
        items.push(converter(row)?);
    }
    Ok(items)
}

/// Execute a query and convert only the first row, if any.
pub async fn get_first_row<T, F>(
    graph: &Neo4jGraph,
    query: Query,
    operation: &'static str,
    converter: F,
) -> Result<Option<T>, RepoError>
where
    F: Fn(Row) -> Result<T, RepoError>,
{
    let mut result = graph
        .execute(query)
        .await
        .map_err(|e| RepoError::database(operation, e))?;

    match result
        .next()
        .await
        .map_err(|e| RepoError::database(operation, e))?
    {
        Some(row) => Ok(Some(converter(row)?)),
        None => Ok(None),
    }
}

/// Execute a query returning a single integer column; no row counts as 0.
pub async fn fetch_count(
    graph: &Neo4jGraph,
    query: Query,
    column: &'static str,
    operation: &'static str,
) -> Result<i64, RepoError> {
    let count = get_first_row(graph, query, operation, |row| {
        row.get::<i64>(column)
            .map_err(|e| RepoError::database(operation, e))
    })
    .await?;
    Ok(count.unwrap_or(0))
}

/// Execute a write query with no return value.
pub async fn run_query(
    graph: &Neo4jGraph,
    query: Query,
    operation: &'static str,
) -> Result<(), RepoError> {
    graph
        .run(query)
        .await
        .map_err(|e| RepoError::database(operation, e))
}

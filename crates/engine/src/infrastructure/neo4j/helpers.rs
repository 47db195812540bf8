//! Neo4j deserialization helpers for node conversion functions.
//!
//! Storage shapes are rebuilt field by field. Ids and foreign keys are
//! required; descriptive fields fall back to defaults so that nodes written
//! by older migrations still load.

use deckgraph_domain::{
    CardId, CardNode, CommentId, CommentNode, DeckId, DeckNode, UserId, UserNode,
};
use neo4rs::{Node, Row};

use crate::infrastructure::ports::RepoError;

/// Extension trait for Neo4j Node to simplify common deserialization patterns.
pub trait NodeExt {
    /// Get a required integer field (ids, foreign keys).
    fn get_i64_strict(&self, field: &str) -> Result<i64, RepoError>;

    /// Get a required string field with strict error handling (fail-fast).
    fn get_string_strict(&self, field: &str) -> Result<String, RepoError>;

    /// Get a string field with a default value if missing.
    fn get_string_or(&self, field: &str, default: &str) -> String;

    /// Get a bool field with a default value if missing.
    fn get_bool_or(&self, field: &str, default: bool) -> bool;

    /// Get an i64 field with a default value if missing.
    fn get_i64_or(&self, field: &str, default: i64) -> i64;
}

impl NodeExt for Node {
    fn get_i64_strict(&self, field: &str) -> Result<i64, RepoError> {
        self.get(field).map_err(|e| {
            RepoError::database(
                "query",
                format!("Missing required field '{}': {}", field, e),
            )
        })
    }

    fn get_string_strict(&self, field: &str) -> Result<String, RepoError> {
        self.get(field).map_err(|e| {
            RepoError::database(
                "query",
                format!("Missing required field '{}': {}", field, e),
            )
        })
    }

    fn get_string_or(&self, field: &str, default: &str) -> String {
        self.get(field).unwrap_or_else(|_| default.to_string())
    }

    fn get_bool_or(&self, field: &str, default: bool) -> bool {
        self.get(field).unwrap_or(default)
    }

    fn get_i64_or(&self, field: &str, default: i64) -> i64 {
        self.get(field).unwrap_or(default)
    }
}

/// Extract a single node column from a row.
pub fn node_column(row: &Row, column: &str) -> Result<Node, RepoError> {
    row.get(column).map_err(|e| {
        RepoError::database("query", format!("Missing node column '{}': {}", column, e))
    })
}

/// Extract a collected list of nodes (`collect(...)`) from a row.
pub fn node_list_column(row: &Row, column: &str) -> Result<Vec<Node>, RepoError> {
    row.get(column).map_err(|e| {
        RepoError::database("query", format!("Missing list column '{}': {}", column, e))
    })
}

// =============================================================================
// Node -> storage shape
// =============================================================================

pub fn user_from_node(node: &Node) -> Result<UserNode, RepoError> {
    Ok(UserNode {
        id: UserId::from_i64(node.get_i64_strict("id")?),
        username: node.get_string_strict("username")?,
    })
}

pub fn deck_from_node(node: &Node) -> Result<DeckNode, RepoError> {
    Ok(DeckNode {
        id: DeckId::from_i64(node.get_i64_strict("id")?),
        name: node.get_string_or("name", ""),
        user_id: UserId::from_i64(node.get_i64_strict("user_id")?),
        is_public: node.get_bool_or("is_public", false),
    })
}

pub fn card_from_node(node: &Node) -> Result<CardNode, RepoError> {
    Ok(CardNode {
        id: CardId::from_i64(node.get_i64_strict("id")?),
        name: node.get_string_or("name", ""),
        description: node.get_string_or("description", ""),
        attack: node.get_i64_or("attack", 0),
        health: node.get_i64_or("health", 0),
        mana_cost: node.get_i64_or("mana_cost", 0),
    })
}

pub fn comment_from_node(node: &Node) -> Result<CommentNode, RepoError> {
    Ok(CommentNode {
        id: CommentId::from_i64(node.get_i64_strict("id")?),
        deck_id: DeckId::from_i64(node.get_i64_strict("deck_id")?),
        user_id: UserId::from_i64(node.get_i64_strict("user_id")?),
        text: node.get_string_or("text", ""),
    })
}

/// Convert every node of a collected list.
pub fn convert_all<T>(
    nodes: &[Node],
    convert: impl Fn(&Node) -> Result<T, RepoError>,
) -> Result<Vec<T>, RepoError> {
    nodes.iter().map(convert).collect()
}

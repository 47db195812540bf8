//! Error types for port operations.

use deckgraph_domain::{NodeRef, RelationType};

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A relationship referenced a node that does not exist.
    #[error("Cannot create {relation} from {from} to {to}: endpoint does not exist")]
    EndpointNotFound {
        relation: RelationType,
        from: NodeRef,
        to: NodeRef,
    },

    /// Database operation failed - includes operation name for tracing.
    #[error("Database error in {operation}: {message}")]
    Database {
        operation: &'static str,
        message: String,
    },
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn endpoint_not_found(relation: RelationType, from: NodeRef, to: NodeRef) -> Self {
        Self::EndpointNotFound { relation, from, to }
    }

    /// Create a Database error with operation context.
    pub fn database(operation: &'static str, message: impl ToString) -> Self {
        Self::Database {
            operation,
            message: message.to_string(),
        }
    }

    pub fn is_endpoint_not_found(&self) -> bool {
        matches!(self, Self::EndpointNotFound { .. })
    }
}

//! Repository port traits for database access.

use async_trait::async_trait;
use deckgraph_domain::{
    CardId, CommentNode, DeckId, DeckNode, GraphNode, NodeLabel, NodeRef, RelationType,
    RelationalSnapshot, UserNode,
};

use super::error::RepoError;
use super::types::{DeckGraph, OwnedDeck};

// =============================================================================
// Identifier Allocation
// =============================================================================

/// Per-label integer id sequence kept in the target store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdAllocator: Send + Sync {
    /// Issue the next id for `label`. Strictly increasing, never reused.
    async fn next_id(&self, label: NodeLabel) -> Result<i64, RepoError>;

    /// Reset the sequence so the next issued id is `start + 1`.
    async fn init_counter(&self, label: NodeLabel, start: i64) -> Result<(), RepoError>;
}

// =============================================================================
// Node / Relationship Mapping
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GraphMapper: Send + Sync {
    async fn create_node(&self, node: &GraphNode) -> Result<(), RepoError>;

    /// Insert a group of nodes that all carry `label`.
    async fn create_nodes(&self, label: NodeLabel, nodes: &[GraphNode]) -> Result<(), RepoError>;

    /// Create `(from)-[:relation]->(to)`.
    ///
    /// Fails with `RepoError::EndpointNotFound` when either node is missing.
    async fn create_relationship(
        &self,
        from: NodeRef,
        to: NodeRef,
        relation: RelationType,
    ) -> Result<(), RepoError>;
}

// =============================================================================
// Deck Graph Access
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeckGraphRepo: Send + Sync {
    /// Deck with its owner (required), cards, comments and comment authors.
    async fn get_deck_graph(&self, id: DeckId) -> Result<Option<DeckGraph>, RepoError>;

    async fn list_public_decks(&self) -> Result<Vec<DeckNode>, RepoError>;

    async fn find_user_by_username(&self, username: &str)
        -> Result<Option<UserNode>, RepoError>;

    /// Decks owned by `username`, each with its cards.
    async fn list_owned_decks(&self, username: &str) -> Result<Vec<OwnedDeck>, RepoError>;

    /// Comments whose `deck_id` property matches. No traversal.
    async fn list_comments_for_deck(&self, deck_id: DeckId)
        -> Result<Vec<CommentNode>, RepoError>;

    /// In one transaction: overwrite the deck node's properties, drop every
    /// `CONTAINS` edge it has, then link it to `card_ids`.
    async fn replace_deck(&self, deck: &DeckNode, card_ids: &[CardId]) -> Result<(), RepoError>;

    /// Remove the deck node. No cascade: comments pointing at it stay.
    async fn delete_deck(&self, id: DeckId) -> Result<(), RepoError>;
}

// =============================================================================
// Relational Source
// =============================================================================

/// Read-only access to the relational store being migrated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationalSource: Send + Sync {
    async fn load_snapshot(&self) -> Result<RelationalSnapshot, RepoError>;
}

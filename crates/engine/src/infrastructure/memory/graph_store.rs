//! In-memory graph implementation for development and testing
//!
//! Implements every graph port over a single lock-protected state, with the
//! same observable semantics as the Neo4j adapters: labels scope ids,
//! relationships need both endpoints, deleting a deck detaches its edges.
//! Nothing is persisted.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use deckgraph_domain::{
    CardId, CardNode, CommentNode, DeckId, DeckNode, GraphNode, NodeLabel, NodeRef, RelationType,
    UserNode,
};
use tokio::sync::RwLock;

use crate::infrastructure::ports::{
    DeckGraph, DeckGraphRepo, GraphMapper, IdAllocator, OwnedDeck, RepoError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Edge {
    from: NodeRef,
    to: NodeRef,
    relation: RelationType,
}

#[derive(Debug, Default)]
struct GraphState {
    nodes: BTreeMap<NodeRef, GraphNode>,
    edges: Vec<Edge>,
    counters: HashMap<NodeLabel, i64>,
}

impl GraphState {
    fn insert(&mut self, node: &GraphNode) -> Result<(), RepoError> {
        let key = node.node_ref();
        if self.nodes.contains_key(&key) {
            return Err(RepoError::database(
                "create_node",
                format!("{} already exists", key),
            ));
        }
        self.nodes.insert(key, node.clone());
        Ok(())
    }

    fn link(&mut self, from: NodeRef, to: NodeRef, relation: RelationType) -> Result<(), RepoError> {
        if !self.nodes.contains_key(&from) || !self.nodes.contains_key(&to) {
            return Err(RepoError::endpoint_not_found(relation, from, to));
        }
        self.edges.push(Edge { from, to, relation });
        Ok(())
    }

    /// Targets of `(from)-[:relation]->(?)`, deduplicated, in id order.
    fn outgoing(&self, from: NodeRef, relation: RelationType) -> Vec<&GraphNode> {
        let mut targets: Vec<NodeRef> = self
            .edges
            .iter()
            .filter(|e| e.from == from && e.relation == relation)
            .map(|e| e.to)
            .collect();
        targets.sort();
        targets.dedup();
        targets.iter().filter_map(|r| self.nodes.get(r)).collect()
    }

    /// Sources of `(?)-[:relation]->(to)`, deduplicated, in id order.
    fn incoming(&self, to: NodeRef, relation: RelationType) -> Vec<&GraphNode> {
        let mut sources: Vec<NodeRef> = self
            .edges
            .iter()
            .filter(|e| e.to == to && e.relation == relation)
            .map(|e| e.from)
            .collect();
        sources.sort();
        sources.dedup();
        sources.iter().filter_map(|r| self.nodes.get(r)).collect()
    }

    fn decks(&self) -> impl Iterator<Item = &DeckNode> {
        self.nodes.values().filter_map(|n| match n {
            GraphNode::Deck(deck) => Some(deck),
            _ => None,
        })
    }

    fn users(&self) -> impl Iterator<Item = &UserNode> {
        self.nodes.values().filter_map(|n| match n {
            GraphNode::User(user) => Some(user),
            _ => None,
        })
    }

    fn cards_of(&self, deck: DeckId) -> Vec<CardNode> {
        self.outgoing(deck.into(), RelationType::Contains)
            .into_iter()
            .filter_map(|n| match n {
                GraphNode::Card(card) => Some(card.clone()),
                _ => None,
            })
            .collect()
    }
}

/// In-memory graph store.
#[derive(Debug, Default)]
pub struct InMemoryGraph {
    state: RwLock<GraphState>,
}

impl InMemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes carrying `label`.
    pub async fn count_nodes(&self, label: NodeLabel) -> usize {
        let state = self.state.read().await;
        let count = state.nodes.keys().filter(|r| r.label == label).count();
        count
    }

    /// Number of relationships of type `relation`.
    pub async fn count_relationships(&self, relation: RelationType) -> usize {
        let state = self.state.read().await;
        let count = state.edges.iter().filter(|e| e.relation == relation).count();
        count
    }

    pub async fn contains_node(&self, node: NodeRef) -> bool {
        self.state.read().await.nodes.contains_key(&node)
    }
}

#[async_trait]
impl IdAllocator for InMemoryGraph {
    async fn next_id(&self, label: NodeLabel) -> Result<i64, RepoError> {
        let mut state = self.state.write().await;
        let counter = state.counters.entry(label).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }

    async fn init_counter(&self, label: NodeLabel, start: i64) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        state.counters.insert(label, start);
        Ok(())
    }
}

#[async_trait]
impl GraphMapper for InMemoryGraph {
    async fn create_node(&self, node: &GraphNode) -> Result<(), RepoError> {
        self.state.write().await.insert(node)
    }

    async fn create_nodes(&self, label: NodeLabel, nodes: &[GraphNode]) -> Result<(), RepoError> {
        if let Some(stray) = nodes.iter().find(|n| n.label() != label) {
            return Err(RepoError::database(
                "create_nodes",
                format!("{} does not belong in a {} batch", stray.node_ref(), label),
            ));
        }
        // One statement in Neo4j: a duplicate anywhere rejects the whole batch.
        let mut staged = GraphState::default();
        let mut state = self.state.write().await;
        for node in nodes {
            if state.nodes.contains_key(&node.node_ref()) {
                return Err(RepoError::database(
                    "create_nodes",
                    format!("{} already exists", node.node_ref()),
                ));
            }
            staged.insert(node)?;
        }
        state.nodes.append(&mut staged.nodes);
        Ok(())
    }

    async fn create_relationship(
        &self,
        from: NodeRef,
        to: NodeRef,
        relation: RelationType,
    ) -> Result<(), RepoError> {
        self.state.write().await.link(from, to, relation)
    }
}

#[async_trait]
impl DeckGraphRepo for InMemoryGraph {
    async fn get_deck_graph(&self, id: DeckId) -> Result<Option<DeckGraph>, RepoError> {
        let state = self.state.read().await;
        let deck = match state.nodes.get(&NodeRef::from(id)) {
            Some(GraphNode::Deck(deck)) => deck.clone(),
            _ => return Ok(None),
        };

        let owner = state
            .incoming(id.into(), RelationType::Owns)
            .into_iter()
            .find_map(|n| match n {
                GraphNode::User(user) => Some(user.clone()),
                _ => None,
            });
        let Some(owner) = owner else {
            return Ok(None);
        };

        let comments: Vec<CommentNode> = state
            .incoming(id.into(), RelationType::IsIn)
            .into_iter()
            .filter_map(|n| match n {
                GraphNode::Comment(comment) => Some(comment.clone()),
                _ => None,
            })
            .collect();

        let mut comment_authors: Vec<UserNode> = Vec::new();
        for comment in &comments {
            for author in state.incoming(comment.id.into(), RelationType::Wrote) {
                if let GraphNode::User(user) = author {
                    if !comment_authors.contains(user) {
                        comment_authors.push(user.clone());
                    }
                }
            }
        }

        Ok(Some(DeckGraph {
            cards: state.cards_of(id),
            deck,
            owner,
            comments,
            comment_authors,
        }))
    }

    async fn list_public_decks(&self) -> Result<Vec<DeckNode>, RepoError> {
        let state = self.state.read().await;
        let decks = state.decks().filter(|d| d.is_public).cloned().collect();
        Ok(decks)
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserNode>, RepoError> {
        let state = self.state.read().await;
        let user = state.users().find(|u| u.username == username).cloned();
        Ok(user)
    }

    async fn list_owned_decks(&self, username: &str) -> Result<Vec<OwnedDeck>, RepoError> {
        let state = self.state.read().await;
        let mut owned = Vec::new();
        for user in state.users().filter(|u| u.username == username) {
            for node in state.outgoing(user.id.into(), RelationType::Owns) {
                if let GraphNode::Deck(deck) = node {
                    owned.push(OwnedDeck {
                        deck: deck.clone(),
                        cards: state.cards_of(deck.id),
                    });
                }
            }
        }
        owned.sort_by_key(|o| o.deck.id);
        Ok(owned)
    }

    async fn list_comments_for_deck(
        &self,
        deck_id: DeckId,
    ) -> Result<Vec<CommentNode>, RepoError> {
        let state = self.state.read().await;
        let comments = state
            .nodes
            .values()
            .filter_map(|n| match n {
                GraphNode::Comment(comment) if comment.deck_id == deck_id => Some(comment.clone()),
                _ => None,
            })
            .collect();
        Ok(comments)
    }

    async fn replace_deck(&self, deck: &DeckNode, card_ids: &[CardId]) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        let deck_ref: NodeRef = deck.id.into();

        if !matches!(state.nodes.get(&deck_ref), Some(GraphNode::Deck(_))) {
            return Err(RepoError::not_found("Deck", deck.id));
        }
        // Validate before touching anything; the write lock makes this all-or-nothing.
        if let Some(missing) = card_ids
            .iter()
            .find(|card| !state.nodes.contains_key(&NodeRef::from(**card)))
        {
            return Err(RepoError::endpoint_not_found(
                RelationType::Contains,
                deck_ref,
                (*missing).into(),
            ));
        }

        state.nodes.insert(deck_ref, GraphNode::Deck(deck.clone()));
        state
            .edges
            .retain(|e| !(e.from == deck_ref && e.relation == RelationType::Contains));
        for card in card_ids {
            state.link(deck_ref, (*card).into(), RelationType::Contains)?;
        }
        Ok(())
    }

    async fn delete_deck(&self, id: DeckId) -> Result<(), RepoError> {
        let mut state = self.state.write().await;
        let deck_ref: NodeRef = id.into();
        if state.nodes.remove(&deck_ref).is_some() {
            state.edges.retain(|e| e.from != deck_ref && e.to != deck_ref);
        }
        Ok(())
    }
}

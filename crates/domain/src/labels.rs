//! Graph vocabulary: node labels, relationship types and node references.
//!
//! Labels and relationship types are interpolated into Cypher text (Cypher
//! cannot parameterize them), so they are closed enums rather than strings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity-type label of a graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeLabel {
    User,
    Deck,
    Card,
    Comment,
    Enemy,
    Fight,
    GameAction,
}

impl NodeLabel {
    pub const ALL: [NodeLabel; 7] = [
        NodeLabel::User,
        NodeLabel::Deck,
        NodeLabel::Card,
        NodeLabel::Comment,
        NodeLabel::Enemy,
        NodeLabel::Fight,
        NodeLabel::GameAction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Deck => "Deck",
            Self::Card => "Card",
            Self::Comment => "Comment",
            Self::Enemy => "Enemy",
            Self::Fight => "Fight",
            Self::GameAction => "GameAction",
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type tag of a directed relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationType {
    /// `(User)-[:OWNS]->(Deck)`
    Owns,
    /// `(Deck)-[:CONTAINS]->(Card)`
    Contains,
    /// `(Comment)-[:IS_IN]->(Deck)`
    IsIn,
    /// `(User)-[:WROTE]->(Comment)`
    Wrote,
    /// `(Enemy)-[:FIGHTS_IN]->(Fight)` and `(User)-[:FIGHTS_IN]->(Fight)`
    FightsIn,
    /// `(GameAction)-[:PART_OF]->(Fight)`
    PartOf,
}

impl RelationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owns => "OWNS",
            Self::Contains => "CONTAINS",
            Self::IsIn => "IS_IN",
            Self::Wrote => "WROTE",
            Self::FightsIn => "FIGHTS_IN",
            Self::PartOf => "PART_OF",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node identified by its label and id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeRef {
    pub label: NodeLabel,
    pub id: i64,
}

impl NodeRef {
    pub const fn new(label: NodeLabel, id: i64) -> Self {
        Self { label, id }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.label, self.id)
    }
}

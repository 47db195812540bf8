//! Storage shapes: exactly the properties a graph node holds.
//!
//! Nodes never embed related collections. A deck's cards and comments exist
//! only as `CONTAINS` / `IS_IN` relationships and are recovered by traversal.

use serde::{Deserialize, Serialize};

use crate::ids::{CardId, CommentId, DeckId, EnemyId, FightId, GameActionId, UserId};
use crate::labels::{NodeLabel, NodeRef};
use crate::relational::{
    CardRecord, CommentRecord, DeckRecord, EnemyRecord, FightRecord, GameActionRecord, UserRecord,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserNode {
    pub id: UserId,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardNode {
    pub id: CardId,
    pub name: String,
    pub description: String,
    pub attack: i64,
    pub health: i64,
    pub mana_cost: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckNode {
    pub id: DeckId,
    pub name: String,
    pub user_id: UserId,
    pub is_public: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentNode {
    pub id: CommentId,
    pub deck_id: DeckId,
    pub user_id: UserId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyNode {
    pub id: EnemyId,
    pub name: String,
    pub health: i64,
    pub attack: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FightNode {
    pub id: FightId,
    pub user_id: UserId,
    pub enemy_id: EnemyId,
    pub user_won: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameActionNode {
    pub id: GameActionId,
    pub name: String,
    pub description: String,
}

/// Any node the mapper can persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphNode {
    User(UserNode),
    Deck(DeckNode),
    Card(CardNode),
    Comment(CommentNode),
    Enemy(EnemyNode),
    Fight(FightNode),
    GameAction(GameActionNode),
}

impl GraphNode {
    pub fn label(&self) -> NodeLabel {
        match self {
            Self::User(_) => NodeLabel::User,
            Self::Deck(_) => NodeLabel::Deck,
            Self::Card(_) => NodeLabel::Card,
            Self::Comment(_) => NodeLabel::Comment,
            Self::Enemy(_) => NodeLabel::Enemy,
            Self::Fight(_) => NodeLabel::Fight,
            Self::GameAction(_) => NodeLabel::GameAction,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::User(n) => n.id.as_i64(),
            Self::Deck(n) => n.id.as_i64(),
            Self::Card(n) => n.id.as_i64(),
            Self::Comment(n) => n.id.as_i64(),
            Self::Enemy(n) => n.id.as_i64(),
            Self::Fight(n) => n.id.as_i64(),
            Self::GameAction(n) => n.id.as_i64(),
        }
    }

    pub fn node_ref(&self) -> NodeRef {
        NodeRef::new(self.label(), self.id())
    }
}

macro_rules! impl_into_graph_node {
    ($node:ident, $variant:ident) => {
        impl From<$node> for GraphNode {
            fn from(node: $node) -> Self {
                GraphNode::$variant(node)
            }
        }
    };
}

impl_into_graph_node!(UserNode, User);
impl_into_graph_node!(DeckNode, Deck);
impl_into_graph_node!(CardNode, Card);
impl_into_graph_node!(CommentNode, Comment);
impl_into_graph_node!(EnemyNode, Enemy);
impl_into_graph_node!(FightNode, Fight);
impl_into_graph_node!(GameActionNode, GameAction);

// =============================================================================
// Relational record -> storage shape
// =============================================================================

impl From<&UserRecord> for UserNode {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username.clone(),
        }
    }
}

impl From<&CardRecord> for CardNode {
    fn from(record: &CardRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            description: record.description.clone(),
            attack: record.attack,
            health: record.health,
            mana_cost: record.mana_cost,
        }
    }
}

/// The card association is dropped here; it becomes `CONTAINS` edges.
impl From<&DeckRecord> for DeckNode {
    fn from(record: &DeckRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            user_id: record.user_id,
            is_public: record.is_public,
        }
    }
}

impl From<&CommentRecord> for CommentNode {
    fn from(record: &CommentRecord) -> Self {
        Self {
            id: record.id,
            deck_id: record.deck_id,
            user_id: record.user_id,
            text: record.text.clone(),
        }
    }
}

impl From<&EnemyRecord> for EnemyNode {
    fn from(record: &EnemyRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            health: record.health,
            attack: record.attack,
        }
    }
}

impl From<&FightRecord> for FightNode {
    fn from(record: &FightRecord) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            enemy_id: record.enemy_id,
            user_won: record.user_won,
        }
    }
}

impl From<&GameActionRecord> for GameActionNode {
    fn from(record: &GameActionRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            description: record.description.clone(),
        }
    }
}

//! Deckgraph domain - ids, graph vocabulary and the two persisted shapes of
//! every entity (relational row and graph node).

pub mod graph;
pub mod ids;
pub mod labels;
pub mod relational;

pub use graph::{
    CardNode, CommentNode, DeckNode, EnemyNode, FightNode, GameActionNode, GraphNode, UserNode,
};
pub use ids::{CardId, CommentId, DeckId, EnemyId, FightId, GameActionId, UserId};
pub use labels::{NodeLabel, NodeRef, RelationType};
pub use relational::{
    max_id_or_one, CardRecord, CommentRecord, DeckRecord, EnemyRecord, FightRecord,
    GameActionRecord, RelationalSnapshot, UserRecord,
};

//! Row shapes read from the relational store.
//!
//! These are read-only inputs to the migration. Foreign keys are kept as
//! typed ids; the deck↔card association table is folded into `DeckRecord`.

use crate::ids::{CardId, CommentId, DeckId, EnemyId, FightId, GameActionId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRecord {
    pub id: CardId,
    pub name: String,
    pub description: String,
    pub attack: i64,
    pub health: i64,
    pub mana_cost: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckRecord {
    pub id: DeckId,
    pub name: String,
    pub user_id: UserId,
    pub is_public: bool,
    /// Card ids from the `deck_cards` association rows, in row order.
    pub card_ids: Vec<CardId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub id: CommentId,
    pub deck_id: DeckId,
    pub user_id: UserId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnemyRecord {
    pub id: EnemyId,
    pub name: String,
    pub health: i64,
    pub attack: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FightRecord {
    pub id: FightId,
    pub user_id: UserId,
    pub enemy_id: EnemyId,
    pub user_won: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameActionRecord {
    pub id: GameActionId,
    pub name: String,
    pub description: String,
}

/// Every relational collection the migration reads, loaded up front.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationalSnapshot {
    pub users: Vec<UserRecord>,
    pub cards: Vec<CardRecord>,
    pub decks: Vec<DeckRecord>,
    pub enemies: Vec<EnemyRecord>,
    pub fights: Vec<FightRecord>,
    pub game_actions: Vec<GameActionRecord>,
    pub comments: Vec<CommentRecord>,
}

/// Highest raw id in a collection, or 1 when the collection is empty.
pub fn max_id_or_one<T, I>(records: &[T], id: impl Fn(&T) -> I) -> i64
where
    I: Into<i64>,
{
    records.iter().map(|r| id(r).into()).max().unwrap_or(1)
}

use serde::{Deserialize, Serialize};

/// A deck as seen by callers.
///
/// How much of it is populated depends on the query: a single-deck lookup
/// fills everything, list queries leave `username` or the collections empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckDto {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
    /// Owner's username (only when the owner was matched)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub is_public: bool,
    #[serde(default)]
    pub cards: Vec<CardDto>,
    #[serde(default)]
    pub comments: Vec<CommentDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDto {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub attack: i64,
    pub health: i64,
    pub mana_cost: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDto {
    pub id: i64,
    pub deck_id: i64,
    pub user_id: i64,
    pub text: String,
    /// Author's username (only when the author was matched)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

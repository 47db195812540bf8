//! Storage shape -> Neo4j property map.
//!
//! One explicit arm per node type; nothing is reflected or inferred, so a
//! field added to a storage shape must be added here too.

use std::collections::HashMap;

use deckgraph_domain::{DeckNode, GraphNode};
use neo4rs::BoltType;

pub type Properties = HashMap<String, BoltType>;

fn props<const N: usize>(entries: [(&str, BoltType); N]) -> Properties {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

pub fn deck_properties(deck: &DeckNode) -> Properties {
    props([
        ("id", deck.id.as_i64().into()),
        ("name", deck.name.clone().into()),
        ("user_id", deck.user_id.as_i64().into()),
        ("is_public", deck.is_public.into()),
    ])
}

pub fn node_properties(node: &GraphNode) -> Properties {
    match node {
        GraphNode::User(user) => props([
            ("id", user.id.as_i64().into()),
            ("username", user.username.clone().into()),
        ]),
        GraphNode::Deck(deck) => deck_properties(deck),
        GraphNode::Card(card) => props([
            ("id", card.id.as_i64().into()),
            ("name", card.name.clone().into()),
            ("description", card.description.clone().into()),
            ("attack", card.attack.into()),
            ("health", card.health.into()),
            ("mana_cost", card.mana_cost.into()),
        ]),
        GraphNode::Comment(comment) => props([
            ("id", comment.id.as_i64().into()),
            ("deck_id", comment.deck_id.as_i64().into()),
            ("user_id", comment.user_id.as_i64().into()),
            ("text", comment.text.clone().into()),
        ]),
        GraphNode::Enemy(enemy) => props([
            ("id", enemy.id.as_i64().into()),
            ("name", enemy.name.clone().into()),
            ("health", enemy.health.into()),
            ("attack", enemy.attack.into()),
        ]),
        GraphNode::Fight(fight) => props([
            ("id", fight.id.as_i64().into()),
            ("user_id", fight.user_id.as_i64().into()),
            ("enemy_id", fight.enemy_id.as_i64().into()),
            ("user_won", fight.user_won.into()),
        ]),
        GraphNode::GameAction(action) => props([
            ("id", action.id.as_i64().into()),
            ("name", action.name.clone().into()),
            ("description", action.description.clone().into()),
        ]),
    }
}

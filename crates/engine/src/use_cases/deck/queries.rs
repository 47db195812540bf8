//! Read side of the deck service.

use std::collections::HashMap;
use std::sync::Arc;

use deckgraph_domain::{CardNode, CommentNode, DeckId, DeckNode, UserId};
use deckgraph_shared::{CardDto, CommentDto, DeckDto};

use super::DeckError;
use crate::infrastructure::ports::{DeckGraph, DeckGraphRepo, OwnedDeck};

pub struct DeckQueries {
    decks: Arc<dyn DeckGraphRepo>,
}

impl DeckQueries {
    pub fn new(decks: Arc<dyn DeckGraphRepo>) -> Self {
        Self { decks }
    }

    /// Deck with owner username, cards and comments.
    ///
    /// `None` when no deck has this id or the deck has no owner.
    pub async fn get_deck_by_id(&self, id: DeckId) -> Result<Option<DeckDto>, DeckError> {
        let graph = self.decks.get_deck_graph(id).await?;
        Ok(graph.map(flatten_deck_graph))
    }

    /// Public decks, without owner, cards or comments.
    pub async fn get_public_decks(&self) -> Result<Vec<DeckDto>, DeckError> {
        let decks = self.decks.list_public_decks().await?;
        Ok(decks.iter().map(thin_deck).collect())
    }

    /// Decks owned by `username`, with their cards. Unknown users own nothing.
    pub async fn get_user_decks(&self, username: &str) -> Result<Vec<DeckDto>, DeckError> {
        if self.decks.find_user_by_username(username).await?.is_none() {
            tracing::debug!(username, "No such user, returning no decks");
            return Ok(Vec::new());
        }

        let owned = self.decks.list_owned_decks(username).await?;
        Ok(owned
            .into_iter()
            .map(|owned| owned_deck(owned, username))
            .collect())
    }

    /// Comments whose deck reference matches `deck_id`, author not resolved.
    pub async fn get_comments_by_deck_id(
        &self,
        deck_id: DeckId,
    ) -> Result<Vec<CommentDto>, DeckError> {
        let comments = self.decks.list_comments_for_deck(deck_id).await?;
        Ok(comments.iter().map(|c| comment_dto(c, None)).collect())
    }
}

// =============================================================================
// Storage shape -> DTO
// =============================================================================

fn thin_deck(deck: &DeckNode) -> DeckDto {
    DeckDto {
        id: deck.id.as_i64(),
        name: deck.name.clone(),
        user_id: deck.user_id.as_i64(),
        username: None,
        is_public: deck.is_public,
        cards: Vec::new(),
        comments: Vec::new(),
    }
}

fn card_dto(card: &CardNode) -> CardDto {
    CardDto {
        id: card.id.as_i64(),
        name: card.name.clone(),
        description: card.description.clone(),
        attack: card.attack,
        health: card.health,
        mana_cost: card.mana_cost,
    }
}

fn comment_dto(comment: &CommentNode, username: Option<String>) -> CommentDto {
    CommentDto {
        id: comment.id.as_i64(),
        deck_id: comment.deck_id.as_i64(),
        user_id: comment.user_id.as_i64(),
        text: comment.text.clone(),
        username,
    }
}

fn sorted_cards(mut cards: Vec<CardNode>) -> Vec<CardDto> {
    cards.sort_by_key(|c| c.id);
    cards.iter().map(card_dto).collect()
}

fn flatten_deck_graph(graph: DeckGraph) -> DeckDto {
    let authors: HashMap<UserId, String> = graph
        .comment_authors
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();

    let mut comments = graph.comments;
    comments.sort_by_key(|c| c.id);

    DeckDto {
        username: Some(graph.owner.username),
        cards: sorted_cards(graph.cards),
        comments: comments
            .iter()
            .map(|c| comment_dto(c, authors.get(&c.user_id).cloned()))
            .collect(),
        ..thin_deck(&graph.deck)
    }
}

fn owned_deck(owned: OwnedDeck, username: &str) -> DeckDto {
    DeckDto {
        username: Some(username.to_string()),
        cards: sorted_cards(owned.cards),
        ..thin_deck(&owned.deck)
    }
}

//! Multi-node results returned by graph ports.

use deckgraph_domain::{CardNode, CommentNode, DeckNode, UserNode};

/// Everything matched around one deck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckGraph {
    pub deck: DeckNode,
    pub owner: UserNode,
    pub cards: Vec<CardNode>,
    pub comments: Vec<CommentNode>,
    /// Distinct users that wrote any of `comments`.
    pub comment_authors: Vec<UserNode>,
}

/// A deck matched through its owner, with its cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedDeck {
    pub deck: DeckNode,
    pub cards: Vec<CardNode>,
}

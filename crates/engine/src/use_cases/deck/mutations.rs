//! Write side of the deck service.

use std::sync::Arc;

use deckgraph_domain::{
    CardId, CommentId, CommentNode, DeckId, DeckNode, GraphNode, NodeLabel, RelationType, UserId,
};
use deckgraph_shared::{CommentDto, DeckDto};

use super::{DeckError, DeckQueries};
use crate::infrastructure::ports::{DeckGraphRepo, GraphMapper, IdAllocator};

pub struct DeckMutations {
    ids: Arc<dyn IdAllocator>,
    mapper: Arc<dyn GraphMapper>,
    decks: Arc<dyn DeckGraphRepo>,
    queries: Arc<DeckQueries>,
}

/// Deck node fields from a DTO. Cards and comments are not node properties.
fn deck_node(id: DeckId, deck: &DeckDto) -> DeckNode {
    DeckNode {
        id,
        name: deck.name.clone(),
        user_id: UserId::from_i64(deck.user_id),
        is_public: deck.is_public,
    }
}

fn card_ids(deck: &DeckDto) -> Vec<CardId> {
    deck.cards.iter().map(|c| CardId::from_i64(c.id)).collect()
}

impl DeckMutations {
    pub fn new(
        ids: Arc<dyn IdAllocator>,
        mapper: Arc<dyn GraphMapper>,
        decks: Arc<dyn DeckGraphRepo>,
        queries: Arc<DeckQueries>,
    ) -> Self {
        Self {
            ids,
            mapper,
            decks,
            queries,
        }
    }

    /// Create a deck under a fresh id, link its cards and owner, and return
    /// it as read back from the graph.
    ///
    /// The steps are separate writes; a failing link leaves the deck node.
    pub async fn add_deck(&self, deck: DeckDto) -> Result<DeckDto, DeckError> {
        let id = DeckId::from_i64(self.ids.next_id(NodeLabel::Deck).await?);
        let node = deck_node(id, &deck);

        self.mapper.create_node(&GraphNode::Deck(node.clone())).await?;

        for card_id in card_ids(&deck) {
            self.mapper
                .create_relationship(id.into(), card_id.into(), RelationType::Contains)
                .await?;
        }
        self.mapper
            .create_relationship(node.user_id.into(), id.into(), RelationType::Owns)
            .await?;

        tracing::info!(deck_id = %id, cards = deck.cards.len(), "Added deck");

        self.queries
            .get_deck_by_id(id)
            .await?
            .ok_or(DeckError::Missing(id))
    }

    /// Overwrite the deck's fields and card set. Unknown decks are ignored.
    ///
    /// Comments are untouched and the `OWNS` edge is not moved, even when
    /// `user_id` changes.
    pub async fn update_deck(&self, deck: DeckDto) -> Result<(), DeckError> {
        let id = DeckId::from_i64(deck.id);
        if self.decks.get_deck_graph(id).await?.is_none() {
            tracing::debug!(deck_id = %id, "Deck not found, nothing to update");
            return Ok(());
        }

        let cards = card_ids(&deck);
        self.decks.replace_deck(&deck_node(id, &deck), &cards).await?;

        tracing::info!(deck_id = %id, cards = cards.len(), "Updated deck");
        Ok(())
    }

    /// Remove the deck. Unknown decks are ignored. Its comments stay.
    pub async fn delete_deck(&self, id: DeckId) -> Result<(), DeckError> {
        if self.decks.get_deck_graph(id).await?.is_none() {
            tracing::debug!(deck_id = %id, "Deck not found, nothing to delete");
            return Ok(());
        }

        self.decks.delete_deck(id).await?;

        tracing::info!(deck_id = %id, "Deleted deck");
        Ok(())
    }

    /// Store a comment under a fresh id and link it to its deck and author.
    ///
    /// Neither reference is checked up front. A missing deck or user fails
    /// with `EndpointNotFound` after the comment node was written.
    pub async fn add_comment(&self, comment: CommentDto) -> Result<CommentId, DeckError> {
        let id = CommentId::from_i64(self.ids.next_id(NodeLabel::Comment).await?);
        let node = CommentNode {
            id,
            deck_id: DeckId::from_i64(comment.deck_id),
            user_id: UserId::from_i64(comment.user_id),
            text: comment.text,
        };

        self.mapper.create_node(&GraphNode::Comment(node.clone())).await?;
        self.mapper
            .create_relationship(id.into(), node.deck_id.into(), RelationType::IsIn)
            .await?;
        self.mapper
            .create_relationship(node.user_id.into(), id.into(), RelationType::Wrote)
            .await?;

        tracing::info!(comment_id = %id, deck_id = %node.deck_id, "Added comment");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockDeckGraphRepo, MockGraphMapper, MockIdAllocator};

    fn mutations(ids: MockIdAllocator, mapper: MockGraphMapper, repo: MockDeckGraphRepo) -> DeckMutations {
        let repo: Arc<dyn DeckGraphRepo> = Arc::new(repo);
        DeckMutations::new(
            Arc::new(ids),
            Arc::new(mapper),
            repo.clone(),
            Arc::new(DeckQueries::new(repo)),
        )
    }

    #[tokio::test]
    async fn update_of_unknown_deck_writes_nothing() {
        let mut repo = MockDeckGraphRepo::new();
        repo.expect_get_deck_graph().returning(|_| Ok(None));
        repo.expect_replace_deck().never();

        let result = mutations(MockIdAllocator::new(), MockGraphMapper::new(), repo)
            .update_deck(DeckDto {
                id: 42,
                name: "Ghost".into(),
                ..Default::default()
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn delete_of_unknown_deck_writes_nothing() {
        let mut repo = MockDeckGraphRepo::new();
        repo.expect_get_deck_graph().returning(|_| Ok(None));
        repo.expect_delete_deck().never();

        let result = mutations(MockIdAllocator::new(), MockGraphMapper::new(), repo)
            .delete_deck(DeckId::from_i64(42))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn add_deck_reports_missing_when_read_back_fails() {
        let mut ids = MockIdAllocator::new();
        ids.expect_next_id().returning(|_| Ok(10));

        let mut mapper = MockGraphMapper::new();
        mapper.expect_create_node().times(1).returning(|_| Ok(()));
        mapper
            .expect_create_relationship()
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut repo = MockDeckGraphRepo::new();
        repo.expect_get_deck_graph().returning(|_| Ok(None));

        let err = mutations(ids, mapper, repo)
            .add_deck(DeckDto {
                name: "Lonely".into(),
                user_id: 1,
                ..Default::default()
            })
            .await
            .expect_err("read back is empty");

        assert!(matches!(err, DeckError::Missing(id) if id == DeckId::from_i64(10)));
    }
}

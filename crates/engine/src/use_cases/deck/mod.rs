//! Deck use cases: queries and mutations over the deck graph.

use std::sync::Arc;

use deckgraph_domain::DeckId;

use crate::infrastructure::ports::{DeckGraphRepo, GraphMapper, IdAllocator, RepoError};

mod mutations;
mod queries;

pub use mutations::DeckMutations;
pub use queries::DeckQueries;

#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    /// The deck was written but could not be read back with its owner.
    #[error("Deck {0} was not found after being written")]
    Missing(DeckId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Container for deck use cases.
pub struct DeckUseCases {
    pub queries: Arc<DeckQueries>,
    pub mutations: Arc<DeckMutations>,
}

impl DeckUseCases {
    pub fn new(
        ids: Arc<dyn IdAllocator>,
        mapper: Arc<dyn GraphMapper>,
        decks: Arc<dyn DeckGraphRepo>,
    ) -> Self {
        let queries = Arc::new(DeckQueries::new(decks.clone()));
        let mutations = Arc::new(DeckMutations::new(ids, mapper, decks, queries.clone()));
        Self { queries, mutations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryGraph;
    use crate::infrastructure::ports::MockRelationalSource;
    use crate::use_cases::migration::Migrate;
    use deckgraph_domain::{
        CardId, CardNode, CardRecord, DeckNode, DeckRecord, GraphNode, NodeLabel, NodeRef,
        RelationalSnapshot, UserId, UserNode, UserRecord,
    };
    use deckgraph_shared::{CardDto, CommentDto, DeckDto};

    struct Fixture {
        graph: Arc<InMemoryGraph>,
        decks: DeckUseCases,
    }

    impl Fixture {
        fn new() -> Self {
            let graph = Arc::new(InMemoryGraph::new());
            let decks = DeckUseCases::new(graph.clone(), graph.clone(), graph.clone());
            Self { graph, decks }
        }

        async fn user(&self, id: i64, username: &str) {
            self.graph
                .create_node(&GraphNode::User(UserNode {
                    id: UserId::from_i64(id),
                    username: username.into(),
                }))
                .await
                .expect("user");
        }

        async fn card(&self, id: i64) {
            self.graph
                .create_node(&GraphNode::Card(CardNode {
                    id: CardId::from_i64(id),
                    name: format!("Card {id}"),
                    description: format!("Card number {id}"),
                    attack: id,
                    health: id + 1,
                    mana_cost: 1,
                }))
                .await
                .expect("card");
        }

        async fn add_deck(&self, owner: i64, cards: &[i64]) -> DeckDto {
            self.decks
                .mutations
                .add_deck(DeckDto {
                    name: "Tempo".into(),
                    user_id: owner,
                    is_public: true,
                    cards: cards.iter().map(|id| card_ref(*id)).collect(),
                    ..Default::default()
                })
                .await
                .expect("add deck")
        }
    }

    fn card_ref(id: i64) -> CardDto {
        CardDto {
            id,
            ..Default::default()
        }
    }

    fn card_ids(deck: &DeckDto) -> Vec<i64> {
        deck.cards.iter().map(|c| c.id).collect()
    }

    #[tokio::test]
    async fn ids_are_strictly_increasing_per_label() {
        let graph = InMemoryGraph::new();

        let mut issued = Vec::new();
        for _ in 0..5 {
            issued.push(graph.next_id(NodeLabel::Deck).await.expect("id"));
        }

        assert!(issued.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(graph.next_id(NodeLabel::Card).await.expect("id"), 1);
    }

    #[tokio::test]
    async fn init_counter_sets_the_next_id() {
        let graph = InMemoryGraph::new();

        graph.init_counter(NodeLabel::Card, 5).await.expect("init");

        assert_eq!(graph.next_id(NodeLabel::Card).await.expect("id"), 6);
    }

    #[tokio::test]
    async fn added_deck_reads_back_with_cards_and_owner() {
        let fx = Fixture::new();
        fx.user(1, "ann").await;
        fx.card(1).await;
        fx.card(2).await;

        let added = fx.add_deck(1, &[2, 1]).await;
        let fetched = fx
            .decks
            .queries
            .get_deck_by_id(DeckId::from_i64(added.id))
            .await
            .expect("query")
            .expect("deck");

        assert_eq!(fetched, added);
        assert_eq!(card_ids(&fetched), vec![1, 2]);
        assert_eq!(fetched.username.as_deref(), Some("ann"));
        assert_eq!(fetched.cards[0].description, "Card number 1");
    }

    #[tokio::test]
    async fn update_replaces_the_card_set() {
        let fx = Fixture::new();
        fx.user(1, "ann").await;
        for id in 1..=3 {
            fx.card(id).await;
        }
        let mut deck = fx.add_deck(1, &[1, 2]).await;

        deck.name = "Renamed".into();
        deck.cards = vec![card_ref(2), card_ref(3)];
        fx.decks.mutations.update_deck(deck.clone()).await.expect("update");

        let fetched = fx
            .decks
            .queries
            .get_deck_by_id(DeckId::from_i64(deck.id))
            .await
            .expect("query")
            .expect("deck");
        assert_eq!(card_ids(&fetched), vec![2, 3]);
        assert_eq!(fetched.name, "Renamed");
    }

    #[tokio::test]
    async fn update_with_unknown_card_leaves_deck_unchanged() {
        let fx = Fixture::new();
        fx.user(1, "ann").await;
        fx.card(1).await;
        let mut deck = fx.add_deck(1, &[1]).await;

        deck.name = "Broken".into();
        deck.cards = vec![card_ref(99)];
        let err = fx
            .decks
            .mutations
            .update_deck(deck.clone())
            .await
            .expect_err("card 99 does not exist");
        assert!(matches!(err, DeckError::Repo(ref e) if e.is_endpoint_not_found()));

        let fetched = fx
            .decks
            .queries
            .get_deck_by_id(DeckId::from_i64(deck.id))
            .await
            .expect("query")
            .expect("deck");
        assert_eq!(card_ids(&fetched), vec![1]);
        assert_eq!(fetched.name, "Tempo");
    }

    #[tokio::test]
    async fn ownerless_deck_is_not_found() {
        let fx = Fixture::new();
        fx.graph
            .create_node(&GraphNode::Deck(DeckNode {
                id: DeckId::from_i64(1),
                name: "Orphan".into(),
                user_id: UserId::from_i64(1),
                is_public: true,
            }))
            .await
            .expect("deck");

        let fetched = fx
            .decks
            .queries
            .get_deck_by_id(DeckId::from_i64(1))
            .await
            .expect("query");

        assert_eq!(fetched, None);
        // Still visible to the flat public listing.
        assert_eq!(
            fx.decks.queries.get_public_decks().await.expect("query").len(),
            1
        );
    }

    #[tokio::test]
    async fn unknown_user_has_no_decks() {
        let fx = Fixture::new();

        let decks = fx
            .decks
            .queries
            .get_user_decks("nonexistent")
            .await
            .expect("query");

        assert!(decks.is_empty());
    }

    #[tokio::test]
    async fn listings_filter_by_visibility_and_owner() {
        let fx = Fixture::new();
        fx.user(1, "ann").await;
        fx.user(2, "bob").await;
        fx.card(1).await;

        let private = fx
            .decks
            .mutations
            .add_deck(DeckDto {
                name: "Secret".into(),
                user_id: 1,
                is_public: false,
                cards: vec![card_ref(1)],
                ..Default::default()
            })
            .await
            .expect("add deck");
        let public = fx.add_deck(2, &[1]).await;

        let listed: Vec<i64> = fx
            .decks
            .queries
            .get_public_decks()
            .await
            .expect("query")
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(listed, vec![public.id]);

        let owned = fx.decks.queries.get_user_decks("ann").await.expect("query");
        assert_eq!(owned.iter().map(|d| d.id).collect::<Vec<_>>(), vec![private.id]);
        assert_eq!(owned[0].username.as_deref(), Some("ann"));
        assert_eq!(card_ids(&owned[0]), vec![1]);
    }

    #[tokio::test]
    async fn comment_on_missing_deck_is_rejected() {
        let fx = Fixture::new();
        fx.user(1, "ann").await;

        let err = fx
            .decks
            .mutations
            .add_comment(CommentDto {
                deck_id: 404,
                user_id: 1,
                text: "Where is it?".into(),
                ..Default::default()
            })
            .await
            .expect_err("deck 404 does not exist");

        assert!(matches!(err, DeckError::Repo(ref e) if e.is_endpoint_not_found()));
        // The node is written before the edge fails; the comment is left behind.
        assert!(fx.graph.contains_node(NodeRef::new(NodeLabel::Comment, 1)).await);
    }

    #[tokio::test]
    async fn comments_survive_deck_deletion() {
        let fx = Fixture::new();
        fx.user(1, "ann").await;
        fx.user(2, "bob").await;
        let deck = fx.add_deck(1, &[]).await;
        let deck_id = DeckId::from_i64(deck.id);

        fx.decks
            .mutations
            .add_comment(CommentDto {
                deck_id: deck.id,
                user_id: 2,
                text: "Needs more removal".into(),
                ..Default::default()
            })
            .await
            .expect("comment");

        let fetched = fx
            .decks
            .queries
            .get_deck_by_id(deck_id)
            .await
            .expect("query")
            .expect("deck");
        assert_eq!(fetched.comments.len(), 1);
        assert_eq!(fetched.comments[0].username.as_deref(), Some("bob"));

        fx.decks.mutations.delete_deck(deck_id).await.expect("delete");

        assert_eq!(
            fx.decks.queries.get_deck_by_id(deck_id).await.expect("query"),
            None
        );
        let orphaned = fx
            .decks
            .queries
            .get_comments_by_deck_id(deck_id)
            .await
            .expect("query");
        assert_eq!(orphaned.len(), 1);
        assert_eq!(orphaned[0].username, None);
    }

    #[tokio::test]
    async fn migrated_deck_is_queryable_and_ids_continue() {
        let graph = Arc::new(InMemoryGraph::new());
        let mut source = MockRelationalSource::new();
        source.expect_load_snapshot().returning(|| {
            Ok(RelationalSnapshot {
                users: vec![UserRecord {
                    id: UserId::from_i64(1),
                    username: "ann".into(),
                }],
                cards: vec![CardRecord {
                    id: CardId::from_i64(1),
                    name: "Imp".into(),
                    description: String::new(),
                    attack: 1,
                    health: 1,
                    mana_cost: 1,
                }],
                decks: vec![DeckRecord {
                    id: DeckId::from_i64(1),
                    name: "Starter".into(),
                    user_id: UserId::from_i64(1),
                    is_public: false,
                    card_ids: vec![CardId::from_i64(1)],
                }],
                ..Default::default()
            })
        });

        Migrate::new(Arc::new(source), graph.clone(), graph.clone())
            .execute()
            .await
            .expect("migration");

        let decks = DeckUseCases::new(graph.clone(), graph.clone(), graph.clone());
        let deck = decks
            .queries
            .get_deck_by_id(DeckId::from_i64(1))
            .await
            .expect("query")
            .expect("deck");

        assert_eq!(deck.user_id, 1);
        assert_eq!(card_ids(&deck), vec![1]);
        assert!(deck.comments.is_empty());
        assert_eq!(graph.next_id(NodeLabel::Card).await.expect("id"), 2);
        assert_eq!(graph.next_id(NodeLabel::Deck).await.expect("id"), 2);
    }
}

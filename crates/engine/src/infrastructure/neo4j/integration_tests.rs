use std::sync::Arc;

use deckgraph_domain::{
    CardId, CardNode, DeckId, DeckNode, GraphNode, NodeLabel, NodeRef, RelationType, UserId,
    UserNode,
};
use deckgraph_shared::{CardDto, CommentDto, DeckDto};

use super::test_harness::Neo4jTestHarness;
use super::{Neo4jDeckRepo, Neo4jGraphMapper, Neo4jIdAllocator};
use crate::app::{App, Repositories};
use crate::infrastructure::ports::{DeckGraphRepo, GraphMapper, IdAllocator};

fn user(id: i64, username: &str) -> GraphNode {
    GraphNode::User(UserNode {
        id: UserId::from_i64(id),
        username: username.into(),
    })
}

fn card(id: i64) -> GraphNode {
    GraphNode::Card(CardNode {
        id: CardId::from_i64(id),
        name: format!("Card {id}"),
        description: "test card".into(),
        attack: 1,
        health: 1,
        mana_cost: id,
    })
}

fn app_on(harness: &Neo4jTestHarness) -> App {
    let graph = harness.graph();
    App::with_repositories(Repositories {
        ids: Arc::new(Neo4jIdAllocator::new(graph.clone())),
        mapper: Arc::new(Neo4jGraphMapper::new(graph.clone())),
        decks: Arc::new(Neo4jDeckRepo::new(graph)),
    })
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn counter_continues_after_init() {
    let harness = Neo4jTestHarness::start().await.expect("Failed to start Neo4j");
    let ids = Neo4jIdAllocator::new(harness.graph());

    assert_eq!(ids.next_id(NodeLabel::Fight).await.expect("id"), 1);
    assert_eq!(ids.next_id(NodeLabel::Fight).await.expect("id"), 2);

    ids.init_counter(NodeLabel::Card, 5).await.expect("init");
    assert_eq!(ids.next_id(NodeLabel::Card).await.expect("id"), 6);
    // Other labels are unaffected.
    assert_eq!(ids.next_id(NodeLabel::Fight).await.expect("id"), 3);
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn relationship_to_missing_node_is_an_endpoint_error() {
    let harness = Neo4jTestHarness::start().await.expect("Failed to start Neo4j");
    let mapper = Neo4jGraphMapper::new(harness.graph());

    mapper
        .create_nodes(NodeLabel::User, &[user(1, "ann"), user(2, "bob")])
        .await
        .expect("users");

    let err = mapper
        .create_relationship(
            NodeRef::new(NodeLabel::User, 1),
            NodeRef::new(NodeLabel::Deck, 9),
            RelationType::Owns,
        )
        .await
        .expect_err("deck 9 does not exist");

    assert!(err.is_endpoint_not_found());
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn deck_lifecycle_against_neo4j() {
    let harness = Neo4jTestHarness::start().await.expect("Failed to start Neo4j");
    let app = app_on(&harness);
    let mapper = &app.repositories.mapper;

    mapper.create_node(&user(1, "ann")).await.expect("user");
    mapper.create_node(&user(2, "bob")).await.expect("user");
    mapper
        .create_nodes(NodeLabel::Card, &[card(1), card(2), card(3)])
        .await
        .expect("cards");

    let decks = &app.use_cases.deck;
    let added = decks
        .mutations
        .add_deck(DeckDto {
            name: "Ramp".into(),
            user_id: 1,
            is_public: true,
            cards: vec![
                CardDto { id: 1, ..Default::default() },
                CardDto { id: 2, ..Default::default() },
            ],
            ..Default::default()
        })
        .await
        .expect("add deck");
    assert_eq!(added.username.as_deref(), Some("ann"));
    assert_eq!(added.cards.len(), 2);

    let mut update = added.clone();
    update.cards = vec![
        CardDto { id: 2, ..Default::default() },
        CardDto { id: 3, ..Default::default() },
    ];
    decks.mutations.update_deck(update).await.expect("update");

    let deck_id = DeckId::from_i64(added.id);
    let fetched = decks
        .queries
        .get_deck_by_id(deck_id)
        .await
        .expect("query")
        .expect("deck");
    assert_eq!(
        fetched.cards.iter().map(|c| c.id).collect::<Vec<_>>(),
        vec![2, 3]
    );

    decks
        .mutations
        .add_comment(CommentDto {
            deck_id: added.id,
            user_id: 2,
            text: "Solid".into(),
            ..Default::default()
        })
        .await
        .expect("comment");

    let with_comment = decks
        .queries
        .get_deck_by_id(deck_id)
        .await
        .expect("query")
        .expect("deck");
    assert_eq!(with_comment.comments.len(), 1);
    assert_eq!(with_comment.comments[0].username.as_deref(), Some("bob"));
    assert_eq!(with_comment.cards.len(), 2);

    let owned = decks.queries.get_user_decks("ann").await.expect("query");
    assert_eq!(owned.len(), 1);

    decks.mutations.delete_deck(deck_id).await.expect("delete");
    assert_eq!(
        decks.queries.get_deck_by_id(deck_id).await.expect("query"),
        None
    );
    assert_eq!(
        decks
            .queries
            .get_comments_by_deck_id(deck_id)
            .await
            .expect("query")
            .len(),
        1
    );
}

#[tokio::test]
#[ignore = "requires docker (testcontainers)"]
async fn failed_replace_rolls_back() {
    let harness = Neo4jTestHarness::start().await.expect("Failed to start Neo4j");
    let graph = harness.graph();
    let mapper = Neo4jGraphMapper::new(graph.clone());
    let repo = Neo4jDeckRepo::new(graph);

    mapper.create_node(&user(1, "ann")).await.expect("user");
    mapper.create_node(&card(1)).await.expect("card");
    let deck = DeckNode {
        id: DeckId::from_i64(1),
        name: "Before".into(),
        user_id: UserId::from_i64(1),
        is_public: false,
    };
    mapper
        .create_node(&GraphNode::Deck(deck.clone()))
        .await
        .expect("deck");
    mapper
        .create_relationship(UserId::from_i64(1).into(), deck.id.into(), RelationType::Owns)
        .await
        .expect("owns");
    mapper
        .create_relationship(deck.id.into(), CardId::from_i64(1).into(), RelationType::Contains)
        .await
        .expect("contains");

    let renamed = DeckNode {
        name: "After".into(),
        ..deck.clone()
    };
    let err = repo
        .replace_deck(&renamed, &[CardId::from_i64(1), CardId::from_i64(77)])
        .await
        .expect_err("card 77 does not exist");
    assert!(err.is_endpoint_not_found());

    let graph = repo
        .get_deck_graph(deck.id)
        .await
        .expect("query")
        .expect("deck");
    assert_eq!(graph.deck.name, "Before");
    assert_eq!(graph.cards.len(), 1);

    harness.clean().await.expect("clean");
}

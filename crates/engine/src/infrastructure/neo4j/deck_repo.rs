//! Neo4j deck repository implementation.
//!
//! Decks are linked to their owner, cards and comments:
//! - `(User)-[:OWNS]->(Deck)`
//! - `(Deck)-[:CONTAINS]->(Card)`
//! - `(Comment)-[:IS_IN]->(Deck)` and `(User)-[:WROTE]->(Comment)`

use async_trait::async_trait;
use deckgraph_domain::{CardId, CommentNode, DeckId, DeckNode, RelationType, UserNode};
use neo4rs::{query, Row, Txn};

use super::helpers::{
    card_from_node, comment_from_node, convert_all, deck_from_node, node_column,
    node_list_column, user_from_node,
};
use super::mapper::relationship_query;
use super::properties::deck_properties;
use super::query_helpers::{collect_rows, get_first_row, run_query};
use crate::infrastructure::neo4j::Neo4jGraph;
use crate::infrastructure::ports::{DeckGraph, DeckGraphRepo, OwnedDeck, RepoError};

/// Repository for Deck graph operations.
pub struct Neo4jDeckRepo {
    graph: Neo4jGraph,
}

impl Neo4jDeckRepo {
    pub fn new(graph: Neo4jGraph) -> Self {
        Self { graph }
    }

    fn row_to_deck_graph(row: Row) -> Result<DeckGraph, RepoError> {
        Ok(DeckGraph {
            deck: deck_from_node(&node_column(&row, "d")?)?,
            owner: user_from_node(&node_column(&row, "u")?)?,
            cards: convert_all(&node_list_column(&row, "cards")?, card_from_node)?,
            comments: convert_all(&node_list_column(&row, "comments")?, comment_from_node)?,
            comment_authors: convert_all(&node_list_column(&row, "authors")?, user_from_node)?,
        })
    }

    fn row_to_owned_deck(row: Row) -> Result<OwnedDeck, RepoError> {
        Ok(OwnedDeck {
            deck: deck_from_node(&node_column(&row, "d")?)?,
            cards: convert_all(&node_list_column(&row, "cards")?, card_from_node)?,
        })
    }

    /// The statements of `replace_deck`, run inside `txn`.
    async fn rewrite_deck(txn: &mut Txn, deck: &DeckNode, card_ids: &[CardId]) -> Result<(), RepoError> {
        let overwrite = query(
            "MATCH (d:Deck {id: $id})
            SET d = $props
            RETURN count(d) AS matched",
        )
        .param("id", deck.id.as_i64())
        .param("props", deck_properties(deck));

        if Self::txn_count(txn, overwrite, "matched").await? == 0 {
            return Err(RepoError::not_found("Deck", deck.id));
        }

        let unlink = query(
            "MATCH (d:Deck {id: $id})-[r:CONTAINS]->(:Card)
            DELETE r",
        )
        .param("id", deck.id.as_i64());

        txn.run(unlink)
            .await
            .map_err(|e| RepoError::database("replace_deck", e))?;

        for card_id in card_ids {
            let link = relationship_query(deck.id.into(), (*card_id).into(), RelationType::Contains);
            if Self::txn_count(txn, link, "created").await? == 0 {
                return Err(RepoError::endpoint_not_found(
                    RelationType::Contains,
                    deck.id.into(),
                    (*card_id).into(),
                ));
            }
        }

        Ok(())
    }

    async fn txn_count(txn: &mut Txn, q: neo4rs::Query, column: &str) -> Result<i64, RepoError> {
        let mut result = txn
            .execute(q)
            .await
            .map_err(|e| RepoError::database("replace_deck", e))?;

        let count = match result
            .next(txn.handle())
            .await
            .map_err(|e| RepoError::database("replace_deck", e))?
        {
            Some(row) => row
                .get::<i64>(column)
                .map_err(|e| RepoError::database("replace_deck", e))?,
            None => 0,
        };
        Ok(count)
    }
}

#[async_trait]
impl DeckGraphRepo for Neo4jDeckRepo {
    async fn get_deck_graph(&self, id: DeckId) -> Result<Option<DeckGraph>, RepoError> {
        // Cards are collected before the comment matches so the two optional
        // matches do not multiply each other's rows.
        let q = query(
            "MATCH (u:User)-[:OWNS]->(d:Deck {id: $id})
            OPTIONAL MATCH (d)-[:CONTAINS]->(c:Card)
            WITH d, u, collect(DISTINCT c) AS cards
            OPTIONAL MATCH (com:Comment)-[:IS_IN]->(d)
            OPTIONAL MATCH (author:User)-[:WROTE]->(com)
            RETURN d, u, cards,
                   collect(DISTINCT com) AS comments,
                   collect(DISTINCT author) AS authors",
        )
        .param("id", id.as_i64());

        get_first_row(&self.graph, q, "get_deck_graph", Self::row_to_deck_graph).await
    }

    async fn list_public_decks(&self) -> Result<Vec<DeckNode>, RepoError> {
        let q = query(
            "MATCH (d:Deck)
            WHERE d.is_public = true
            RETURN d
            ORDER BY d.id",
        );

        collect_rows(&self.graph, q, "list_public_decks", |row| {
            deck_from_node(&node_column(&row, "d")?)
        })
        .await
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserNode>, RepoError> {
        let q = query(
            "MATCH (u:User {username: $username})
            RETURN u
            ORDER BY u.id
            LIMIT 1",
        )
        .param("username", username);

        get_first_row(&self.graph, q, "find_user_by_username", |row| {
            user_from_node(&node_column(&row, "u")?)
        })
        .await
    }

    async fn list_owned_decks(&self, username: &str) -> Result<Vec<OwnedDeck>, RepoError> {
        let q = query(
            "MATCH (u:User {username: $username})-[:OWNS]->(d:Deck)
            OPTIONAL MATCH (d)-[:CONTAINS]->(c:Card)
            WITH d, collect(DISTINCT c) AS cards
            RETURN d, cards
            ORDER BY d.id",
        )
        .param("username", username);

        collect_rows(&self.graph, q, "list_owned_decks", Self::row_to_owned_deck).await
    }

    async fn list_comments_for_deck(
        &self,
        deck_id: DeckId,
    ) -> Result<Vec<CommentNode>, RepoError> {
        let q = query(
            "MATCH (c:Comment)
            WHERE c.deck_id = $deck_id
            RETURN c
            ORDER BY c.id",
        )
        .param("deck_id", deck_id.as_i64());

        collect_rows(&self.graph, q, "list_comments_for_deck", |row| {
            comment_from_node(&node_column(&row, "c")?)
        })
        .await
    }

    async fn replace_deck(&self, deck: &DeckNode, card_ids: &[CardId]) -> Result<(), RepoError> {
        let mut txn = self
            .graph
            .start_txn()
            .await
            .map_err(|e| RepoError::database("replace_deck", e))?;

        match Self::rewrite_deck(&mut txn, deck, card_ids).await {
            Ok(()) => {
                txn.commit()
                    .await
                    .map_err(|e| RepoError::database("replace_deck", e))?;
                tracing::debug!(deck_id = %deck.id, cards = card_ids.len(), "Replaced deck");
                Ok(())
            }
            Err(err) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(
                        deck_id = %deck.id,
                        error = %rollback_err,
                        "Rollback after failed deck replace also failed"
                    );
                }
                Err(err)
            }
        }
    }

    async fn delete_deck(&self, id: DeckId) -> Result<(), RepoError> {
        // DETACH is required by Neo4j; Comment nodes themselves are left in place.
        let q = query("MATCH (d:Deck {id: $id}) DETACH DELETE d").param("id", id.as_i64());

        run_query(&self.graph, q, "delete_deck").await?;

        tracing::debug!(deck_id = %id, "Deleted deck");
        Ok(())
    }
}

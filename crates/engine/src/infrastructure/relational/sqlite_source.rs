//! SQLite-backed relational source.
//!
//! Reads the card game's relational tables into a `RelationalSnapshot`.
//! Only `SELECT` statements are issued.

use std::collections::HashMap;

use async_trait::async_trait;
use deckgraph_domain::{
    CardId, CardRecord, CommentId, CommentRecord, DeckId, DeckRecord, EnemyId, EnemyRecord,
    FightId, FightRecord, GameActionId, GameActionRecord, RelationalSnapshot, UserId, UserRecord,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{RelationalSource, RepoError};

/// SQLite implementation of the relational source.
pub struct SqliteRelationalSource {
    pool: SqlitePool,
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, RepoError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepoError::database("load_snapshot", e))
}

impl SqliteRelationalSource {
    /// Open `url` (e.g. `sqlite:cardgame.db`) read-only.
    pub async fn connect(url: &str) -> Result<Self, RepoError> {
        let separator = if url.contains('?') { '&' } else { '?' };
        let pool = SqlitePool::connect(&format!("{url}{separator}mode=ro"))
            .await
            .map_err(|e| RepoError::database("connect", e))?;
        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, sql: &'static str) -> Result<Vec<SqliteRow>, RepoError> {
        sqlx::query(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("load_snapshot", e))
    }

    async fn load_users(&self) -> Result<Vec<UserRecord>, RepoError> {
        self.fetch("SELECT id, username FROM users ORDER BY id")
            .await?
            .iter()
            .map(|row| {
                Ok(UserRecord {
                    id: UserId::from_i64(column(row, "id")?),
                    username: column(row, "username")?,
                })
            })
            .collect()
    }

    async fn load_cards(&self) -> Result<Vec<CardRecord>, RepoError> {
        self.fetch(
            "SELECT id, name, description, attack, health, mana_cost FROM cards ORDER BY id",
        )
        .await?
        .iter()
        .map(|row| {
            Ok(CardRecord {
                id: CardId::from_i64(column(row, "id")?),
                name: column(row, "name")?,
                description: column::<Option<String>>(row, "description")?.unwrap_or_default(),
                attack: column(row, "attack")?,
                health: column(row, "health")?,
                mana_cost: column(row, "mana_cost")?,
            })
        })
        .collect()
    }

    /// Decks with their `deck_cards` association folded in.
    async fn load_decks(&self) -> Result<Vec<DeckRecord>, RepoError> {
        let mut card_ids: HashMap<DeckId, Vec<CardId>> = HashMap::new();
        for row in self
            .fetch("SELECT deck_id, card_id FROM deck_cards ORDER BY deck_id, card_id")
            .await?
        {
            card_ids
                .entry(DeckId::from_i64(column(&row, "deck_id")?))
                .or_default()
                .push(CardId::from_i64(column(&row, "card_id")?));
        }

        let decks = self
            .fetch("SELECT id, name, user_id, is_public FROM decks ORDER BY id")
            .await?
            .iter()
            .map(|row| {
                let id = DeckId::from_i64(column(row, "id")?);
                Ok(DeckRecord {
                    id,
                    name: column(row, "name")?,
                    user_id: UserId::from_i64(column(row, "user_id")?),
                    is_public: column(row, "is_public")?,
                    card_ids: card_ids.remove(&id).unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, RepoError>>()?;

        for deck_id in card_ids.keys() {
            tracing::warn!(%deck_id, "deck_cards rows reference a missing deck; skipped");
        }
        Ok(decks)
    }

    async fn load_enemies(&self) -> Result<Vec<EnemyRecord>, RepoError> {
        self.fetch("SELECT id, name, health, attack FROM enemies ORDER BY id")
            .await?
            .iter()
            .map(|row| {
                Ok(EnemyRecord {
                    id: EnemyId::from_i64(column(row, "id")?),
                    name: column(row, "name")?,
                    health: column(row, "health")?,
                    attack: column(row, "attack")?,
                })
            })
            .collect()
    }

    async fn load_fights(&self) -> Result<Vec<FightRecord>, RepoError> {
        self.fetch("SELECT id, user_id, enemy_id, user_won FROM fights ORDER BY id")
            .await?
            .iter()
            .map(|row| {
                Ok(FightRecord {
                    id: FightId::from_i64(column(row, "id")?),
                    user_id: UserId::from_i64(column(row, "user_id")?),
                    enemy_id: EnemyId::from_i64(column(row, "enemy_id")?),
                    user_won: column(row, "user_won")?,
                })
            })
            .collect()
    }

    async fn load_game_actions(&self) -> Result<Vec<GameActionRecord>, RepoError> {
        self.fetch("SELECT id, name, description FROM game_actions ORDER BY id")
            .await?
            .iter()
            .map(|row| {
                Ok(GameActionRecord {
                    id: GameActionId::from_i64(column(row, "id")?),
                    name: column(row, "name")?,
                    description: column::<Option<String>>(row, "description")?
                        .unwrap_or_default(),
                })
            })
            .collect()
    }

    async fn load_comments(&self) -> Result<Vec<CommentRecord>, RepoError> {
        self.fetch("SELECT id, deck_id, user_id, text FROM comments ORDER BY id")
            .await?
            .iter()
            .map(|row| {
                Ok(CommentRecord {
                    id: CommentId::from_i64(column(row, "id")?),
                    deck_id: DeckId::from_i64(column(row, "deck_id")?),
                    user_id: UserId::from_i64(column(row, "user_id")?),
                    text: column(row, "text")?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl RelationalSource for SqliteRelationalSource {
    async fn load_snapshot(&self) -> Result<RelationalSnapshot, RepoError> {
        let snapshot = RelationalSnapshot {
            users: self.load_users().await?,
            cards: self.load_cards().await?,
            decks: self.load_decks().await?,
            enemies: self.load_enemies().await?,
            fights: self.load_fights().await?,
            game_actions: self.load_game_actions().await?,
            comments: self.load_comments().await?,
        };

        tracing::info!(
            users = snapshot.users.len(),
            cards = snapshot.cards.len(),
            decks = snapshot.decks.len(),
            enemies = snapshot.enemies.len(),
            fights = snapshot.fights.len(),
            game_actions = snapshot.game_actions.len(),
            comments = snapshot.comments.len(),
            "Loaded relational snapshot"
        );
        Ok(snapshot)
    }
}

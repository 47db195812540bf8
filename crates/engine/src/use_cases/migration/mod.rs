//! Relational -> graph migration.
//!
//! One run copies every relational collection into the graph:
//! 1. load the snapshot (read only)
//! 2. convert records to storage shapes
//! 3. insert node groups: Cards, Decks, Enemies, Users, Fights, GameActions, Comments
//! 4. create relationships (every endpoint exists by now)
//! 5. move each label's id counter past the highest migrated id
//!
//! The first failure aborts the run. Nothing is rolled back, and re-running
//! against a non-empty graph duplicates nodes.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use deckgraph_domain::{
    max_id_or_one, CardNode, CommentNode, DeckNode, EnemyNode, FightNode, GameActionNode,
    GraphNode, NodeLabel, NodeRef, RelationType, RelationalSnapshot, UserNode,
};

use crate::infrastructure::ports::{GraphMapper, IdAllocator, RelationalSource, RepoError};

/// Step of the migration that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationPhase {
    LoadSnapshot,
    InsertNodes(NodeLabel),
    CreateRelationship(RelationType),
    InitCounter(NodeLabel),
}

impl fmt::Display for MigrationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadSnapshot => f.write_str("loading the relational snapshot"),
            Self::InsertNodes(label) => write!(f, "inserting {label} nodes"),
            Self::CreateRelationship(relation) => write!(f, "creating {relation} relationships"),
            Self::InitCounter(label) => write!(f, "initializing the {label} id counter"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Migration failed while {phase}: {source}")]
pub struct MigrationError {
    pub phase: MigrationPhase,
    #[source]
    pub source: RepoError,
}

impl MigrationError {
    fn at(phase: MigrationPhase) -> impl FnOnce(RepoError) -> Self {
        move |source| Self { phase, source }
    }
}

/// What a completed run wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub nodes: BTreeMap<NodeLabel, usize>,
    pub relationships: usize,
}

impl MigrationReport {
    pub fn node_count(&self, label: NodeLabel) -> usize {
        self.nodes.get(&label).copied().unwrap_or(0)
    }

    pub fn total_nodes(&self) -> usize {
        self.nodes.values().sum()
    }
}

/// A relationship the migration will create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedRelationship {
    pub from: NodeRef,
    pub to: NodeRef,
    pub relation: RelationType,
}

/// Node groups in insertion order.
pub fn node_groups(snapshot: &RelationalSnapshot) -> Vec<(NodeLabel, Vec<GraphNode>)> {
    fn convert<'a, R, N>(records: &'a [R]) -> Vec<GraphNode>
    where
        N: From<&'a R> + Into<GraphNode>,
    {
        records.iter().map(|r| N::from(r).into()).collect()
    }

    vec![
        (NodeLabel::Card, convert::<_, CardNode>(&snapshot.cards)),
        (NodeLabel::Deck, convert::<_, DeckNode>(&snapshot.decks)),
        (NodeLabel::Enemy, convert::<_, EnemyNode>(&snapshot.enemies)),
        (NodeLabel::User, convert::<_, UserNode>(&snapshot.users)),
        (NodeLabel::Fight, convert::<_, FightNode>(&snapshot.fights)),
        (
            NodeLabel::GameAction,
            convert::<_, GameActionNode>(&snapshot.game_actions),
        ),
        (NodeLabel::Comment, convert::<_, CommentNode>(&snapshot.comments)),
    ]
}

/// Every relationship implied by the snapshot's foreign keys.
///
/// Game actions carry no fight reference in the relational schema, so each
/// one is linked to every fight.
pub fn relationship_plan(snapshot: &RelationalSnapshot) -> Vec<PlannedRelationship> {
    let mut plan = Vec::new();
    let mut push = |from: NodeRef, to: NodeRef, relation| {
        plan.push(PlannedRelationship { from, to, relation })
    };

    for deck in &snapshot.decks {
        for card_id in &deck.card_ids {
            push(deck.id.into(), (*card_id).into(), RelationType::Contains);
        }
        push(deck.user_id.into(), deck.id.into(), RelationType::Owns);
    }

    for comment in &snapshot.comments {
        push(comment.id.into(), comment.deck_id.into(), RelationType::IsIn);
        push(comment.user_id.into(), comment.id.into(), RelationType::Wrote);
    }

    for fight in &snapshot.fights {
        push(fight.enemy_id.into(), fight.id.into(), RelationType::FightsIn);
        push(fight.user_id.into(), fight.id.into(), RelationType::FightsIn);
        for action in &snapshot.game_actions {
            push(action.id.into(), fight.id.into(), RelationType::PartOf);
        }
    }

    plan
}

/// Counter start per label: highest migrated id, or 1 for an empty collection.
pub fn counter_starts(snapshot: &RelationalSnapshot) -> [(NodeLabel, i64); 7] {
    [
        (NodeLabel::Card, max_id_or_one(&snapshot.cards, |r| r.id)),
        (NodeLabel::Deck, max_id_or_one(&snapshot.decks, |r| r.id)),
        (NodeLabel::Enemy, max_id_or_one(&snapshot.enemies, |r| r.id)),
        (NodeLabel::User, max_id_or_one(&snapshot.users, |r| r.id)),
        (NodeLabel::Fight, max_id_or_one(&snapshot.fights, |r| r.id)),
        (
            NodeLabel::GameAction,
            max_id_or_one(&snapshot.game_actions, |r| r.id),
        ),
        (NodeLabel::Comment, max_id_or_one(&snapshot.comments, |r| r.id)),
    ]
}

/// Bulk importer.
pub struct Migrate {
    source: Arc<dyn RelationalSource>,
    mapper: Arc<dyn GraphMapper>,
    ids: Arc<dyn IdAllocator>,
}

impl Migrate {
    pub fn new(
        source: Arc<dyn RelationalSource>,
        mapper: Arc<dyn GraphMapper>,
        ids: Arc<dyn IdAllocator>,
    ) -> Self {
        Self { source, mapper, ids }
    }

    pub async fn execute(&self) -> Result<MigrationReport, MigrationError> {
        let snapshot = self
            .source
            .load_snapshot()
            .await
            .map_err(MigrationError::at(MigrationPhase::LoadSnapshot))?;

        let mut report = MigrationReport::default();

        for (label, nodes) in node_groups(&snapshot) {
            report.nodes.insert(label, nodes.len());
            if nodes.is_empty() {
                tracing::debug!(%label, "No rows to migrate");
                continue;
            }
            self.mapper
                .create_nodes(label, &nodes)
                .await
                .map_err(MigrationError::at(MigrationPhase::InsertNodes(label)))?;
            tracing::info!(%label, count = nodes.len(), "Inserted nodes");
        }

        let plan = relationship_plan(&snapshot);
        for rel in &plan {
            self.mapper
                .create_relationship(rel.from, rel.to, rel.relation)
                .await
                .map_err(MigrationError::at(MigrationPhase::CreateRelationship(
                    rel.relation,
                )))?;
        }
        report.relationships = plan.len();
        tracing::info!(count = plan.len(), "Created relationships");

        for (label, start) in counter_starts(&snapshot) {
            self.ids
                .init_counter(label, start)
                .await
                .map_err(MigrationError::at(MigrationPhase::InitCounter(label)))?;
            tracing::debug!(%label, start, "Initialized id counter");
        }

        tracing::info!(
            nodes = report.total_nodes(),
            relationships = report.relationships,
            "Migration complete"
        );
        Ok(report)
    }
}

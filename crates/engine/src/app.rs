//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    neo4j::Neo4jRepositories,
    ports::{DeckGraphRepo, GraphMapper, IdAllocator, RelationalSource},
};
use crate::use_cases;

/// Main application state.
///
/// Holds the graph ports and the use cases built on them.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for the graph ports.
///
/// All fields are `Arc<dyn PortTrait>` so the Neo4j adapters and the
/// in-memory graph are interchangeable.
#[derive(Clone)]
pub struct Repositories {
    pub ids: Arc<dyn IdAllocator>,
    pub mapper: Arc<dyn GraphMapper>,
    pub decks: Arc<dyn DeckGraphRepo>,
}

impl From<Neo4jRepositories> for Repositories {
    fn from(repos: Neo4jRepositories) -> Self {
        Self {
            ids: repos.ids,
            mapper: repos.mapper,
            decks: repos.decks,
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub deck: use_cases::DeckUseCases,
}

impl App {
    /// Create a new App over Neo4j.
    pub fn new(repos: Neo4jRepositories) -> Self {
        Self::with_repositories(repos.into())
    }

    pub fn with_repositories(repositories: Repositories) -> Self {
        let deck = use_cases::DeckUseCases::new(
            repositories.ids.clone(),
            repositories.mapper.clone(),
            repositories.decks.clone(),
        );

        Self {
            repositories,
            use_cases: UseCases { deck },
        }
    }

    /// Bulk importer reading from `source` and writing to this app's graph.
    pub fn migration(&self, source: Arc<dyn RelationalSource>) -> use_cases::Migrate {
        use_cases::Migrate::new(
            source,
            self.repositories.mapper.clone(),
            self.repositories.ids.clone(),
        )
    }
}

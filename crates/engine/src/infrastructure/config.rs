//! Environment-driven configuration for the migrator.

use std::fmt;

const NEO4J_SCHEMES: [&str; 6] = [
    "bolt://",
    "bolt+s://",
    "bolt+ssc://",
    "neo4j://",
    "neo4j+s://",
    "neo4j+ssc://",
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is set but empty")]
    Empty { var: &'static str },
    #[error("{var} has an unsupported scheme: {value}")]
    UnsupportedScheme { var: &'static str, value: String },
}

#[derive(Clone)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl fmt::Debug for Neo4jConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neo4jConfig")
            .field("uri", &self.uri)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub neo4j: Neo4jConfig,
    /// sqlx connection URL of the relational store being migrated.
    pub relational_db_url: String,
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |var: &'static str, default: &str| -> Result<String, ConfigError> {
            match lookup(var) {
                None => Ok(default.to_string()),
                Some(value) if value.trim().is_empty() => Err(ConfigError::Empty { var }),
                Some(value) => Ok(value.trim().to_string()),
            }
        };

        let uri = read("NEO4J_URI", "bolt://localhost:7687")?;
        if !NEO4J_SCHEMES.iter().any(|scheme| uri.starts_with(scheme)) {
            return Err(ConfigError::UnsupportedScheme {
                var: "NEO4J_URI",
                value: uri,
            });
        }

        let relational_db_url = read("RELATIONAL_DB_URL", "sqlite:cardgame.db")?;
        if !relational_db_url.starts_with("sqlite:") {
            return Err(ConfigError::UnsupportedScheme {
                var: "RELATIONAL_DB_URL",
                value: relational_db_url,
            });
        }

        Ok(Self {
            neo4j: Neo4jConfig {
                uri,
                user: read("NEO4J_USER", "neo4j")?,
                password: read("NEO4J_PASSWORD", "password")?,
            },
            relational_db_url,
        })
    }
}

/// Load `.env.local` then `.env` from the repo root. Variables already set
/// in the process environment win.
pub fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            if let Err(e) = dotenvy::from_path(&path) {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable env file");
            }
        }
    }
}

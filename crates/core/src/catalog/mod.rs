//! The catalog store and its data sources.

mod builtin;
/// Loading catalogs from JSON files on disk.
pub mod loader;

pub use loader::CatalogLoader;

use std::{collections::HashSet, path::PathBuf, sync::Arc};

use thiserror::Error;

use crate::models::GameRecord;

/// Failures while assembling a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two records share an id.
    #[error("duplicate game id {id} ({first:?} and {second:?})")]
    DuplicateId {
        /// The repeated id.
        id: u32,
        /// Title of the record seen first.
        first: String,
        /// Title of the conflicting record.
        second: String,
    },
    /// A catalog file or directory could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// A catalog file is not a JSON array of game records.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },
    /// Walking a catalog directory failed.
    #[error("failed to walk {path}: {source}")]
    Walk {
        /// Directory being walked.
        path: PathBuf,
        /// Underlying error.
        source: walkdir::Error,
    },
}

/// Immutable, ordered collection of every game the storefront offers.
///
/// Cloning is cheap; clones share the same records.
#[derive(Debug, Clone)]
pub struct Catalog {
    games: Arc<[GameRecord]>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids. Order is preserved.
    pub fn new(games: Vec<GameRecord>) -> Result<Self, CatalogError> {
        let mut seen: HashSet<u32> = HashSet::with_capacity(games.len());
        for (index, game) in games.iter().enumerate() {
            if !seen.insert(game.id) {
                let first = games[..index]
                    .iter()
                    .find(|other| other.id == game.id)
                    .map(|other| other.title.clone())
                    .unwrap_or_default();
                return Err(CatalogError::DuplicateId {
                    id: game.id,
                    first,
                    second: game.title.clone(),
                });
            }
        }
        Ok(Self {
            games: games.into(),
        })
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Self {
        Self {
            games: builtin::GAMES.clone(),
        }
    }

    /// Every record in catalog order.
    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether the catalog has no records.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Look a record up by id.
    pub fn get(&self, id: u32) -> Option<&GameRecord> {
        self.games.iter().find(|game| game.id == id)
    }

    /// Lowest and highest price in the catalog, if any.
    pub fn price_span(&self) -> Option<(u32, u32)> {
        let min = self.games.iter().map(|game| game.price).min()?;
        let max = self.games.iter().map(|game| game.price).max()?;
        Some((min, max))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

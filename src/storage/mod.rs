//! Local match data files.
//!
//! The data directory holds the player's analyzed matches and rating
//! history as JSONL:
//! - `matches.jsonl`: one [`Match`](crate::models::Match) per line
//! - `ratings.jsonl`: one [`RatingPoint`](crate::models::RatingPoint) per line

mod jsonl;

pub use jsonl::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn path_for(&self, entity: EntityType) -> PathBuf {
        self.data_dir.join(entity.filename())
    }

    pub fn matches_path(&self) -> PathBuf {
        self.path_for(EntityType::Match)
    }

    pub fn ratings_path(&self) -> PathBuf {
        self.path_for(EntityType::Rating)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::models::{Match, ProfileId, RatingPoint};
use crate::storage::StorageConfig;

/// The in-memory collection every view is computed from. Appends take the
/// write lock, so they never interleave with a recomputation.
#[derive(Debug, Default)]
pub struct Dataset {
    pub matches: Vec<Match>,
    pub ratings: Vec<RatingPoint>,
}

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
    pub dataset: Arc<RwLock<Dataset>>,
    pub profile_id: ProfileId,
    pub duration_bucket_seconds: u64,
}

impl AppState {
    pub fn new(
        storage: StorageConfig,
        dataset: Dataset,
        profile_id: ProfileId,
        duration_bucket_seconds: u64,
    ) -> Self {
        Self {
            storage: Arc::new(storage),
            dataset: Arc::new(RwLock::new(dataset)),
            profile_id,
            duration_bucket_seconds,
        }
    }
}

pub mod sqlite;

use std::sync::Arc;

use crate::{
    config::StorageConfig,
    models::{ChatTurn, NewTurn},
};
use async_trait::async_trait;
use eyre::Result;
use sqlite::Sqlite;

/// Durable record of chat turns. Every listing is ascending by creation
/// time, which is the canonical conversation order.
#[async_trait]
pub trait Storage {
    /// Assigns the identifier and creation time, persists the turn and
    /// returns the stored record.
    async fn append_turn(&self, turn: NewTurn) -> Result<ChatTurn>;

    /// Returns every turn, restricted to one session when `session_id` is set.
    async fn list_turns(&self, session_id: Option<&str>) -> Result<Vec<ChatTurn>>;

    /// Returns at most `limit` of the latest turns of a session, oldest first.
    async fn recent_turns(&self, session_id: &str, limit: usize) -> Result<Vec<ChatTurn>>;
}

pub type ArcStorage = Arc<dyn Storage + Send + Sync>;

pub async fn new_storage(config: &StorageConfig) -> Result<ArcStorage> {
    let storage = match config {
        StorageConfig::Sqlite(sqlite_config) => Arc::new(Sqlite::new(sqlite_config.path()).await?),
    };
    Ok(storage)
}

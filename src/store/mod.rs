pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::player::Player;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("The store is unavailable. Reason: '{0}'.")]
    Unavailable(String),
    #[error("The player does not exist. PlayerId: '{0}'.")]
    PlayerDoesNotExist(u32),
}

/// Durable list of players. The engine never caches its contents across
/// awaited calls: score updates read-modify-write through this contract.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// One-time initialization before the first read, loading persisted
    /// state or seeding defaults. A no-op unless the implementation needs it.
    async fn init(&self) -> Result<(), StoreError> {
        Ok(())
    }
    async fn get_players(&self) -> Result<Vec<Player>, StoreError>;
    async fn add_player(&self, player: Player) -> Result<(), StoreError>;
    async fn remove_player(&self, player_id: u32) -> Result<(), StoreError>;
    async fn update_points(&self, player_id: u32, points: i64) -> Result<(), StoreError>;
    async fn assign_team(&self, player_id: u32, team: u32) -> Result<(), StoreError>;
    async fn reset_points(&self) -> Result<(), StoreError>;
}

/// Durable list of submitted words. Copied into the deck at round start, the
/// deck never mutates the store.
#[async_trait]
pub trait WordStore: Send + Sync {
    async fn get_words(&self) -> Result<Vec<String>, StoreError>;
    async fn add_word(&self, word: &str) -> Result<(), StoreError>;
    async fn remove_word(&self, word: &str) -> Result<(), StoreError>;
    async fn remove_all_words(&self) -> Result<(), StoreError>;
}

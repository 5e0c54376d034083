use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::player::Player;
use crate::store::{PlayerStore, StoreError, WordStore};

/// In-memory `PlayerStore`, the reference implementation used by the tests
/// and by embedders that do not need durable persistence.
#[derive(Default)]
pub struct InMemoryPlayerStore {
    players: RwLock<Vec<Player>>,
}

impl InMemoryPlayerStore {
    pub fn new() -> Self {
        InMemoryPlayerStore::default()
    }

    pub fn with_players(players: Vec<Player>) -> Self {
        InMemoryPlayerStore {
            players: RwLock::new(players),
        }
    }
}

#[async_trait]
impl PlayerStore for InMemoryPlayerStore {
    /// Seeds the default player list when the store is empty, mirroring a
    /// first application start.
    async fn init(&self) -> Result<(), StoreError> {
        let mut players = self.players.write().await;
        if players.is_empty() {
            *players = vec![
                Player {
                    id: 1,
                    name: "Player 1".to_string(),
                    points: 100,
                    team: 1,
                },
                Player {
                    id: 2,
                    name: "Player 2".to_string(),
                    points: 150,
                    team: 2,
                },
                Player {
                    id: 3,
                    name: "Player 3".to_string(),
                    points: 200,
                    team: 1,
                },
                Player {
                    id: 4,
                    name: "Player 4".to_string(),
                    points: 250,
                    team: 2,
                },
            ];
        }
        Ok(())
    }

    async fn get_players(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.players.read().await.clone())
    }

    async fn add_player(&self, player: Player) -> Result<(), StoreError> {
        self.players.write().await.push(player);
        Ok(())
    }

    async fn remove_player(&self, player_id: u32) -> Result<(), StoreError> {
        self.players
            .write()
            .await
            .retain(|player| player.id != player_id);
        Ok(())
    }

    async fn update_points(&self, player_id: u32, points: i64) -> Result<(), StoreError> {
        let mut players = self.players.write().await;
        match players.iter_mut().find(|player| player.id == player_id) {
            Some(player) => {
                player.points = points;
                Ok(())
            }
            None => Err(StoreError::PlayerDoesNotExist(player_id)),
        }
    }

    async fn assign_team(&self, player_id: u32, team: u32) -> Result<(), StoreError> {
        let mut players = self.players.write().await;
        match players.iter_mut().find(|player| player.id == player_id) {
            Some(player) => {
                player.team = team;
                Ok(())
            }
            None => Err(StoreError::PlayerDoesNotExist(player_id)),
        }
    }

    async fn reset_points(&self) -> Result<(), StoreError> {
        for player in self.players.write().await.iter_mut() {
            player.points = 0;
        }
        Ok(())
    }
}

/// In-memory `WordStore` counterpart.
#[derive(Default)]
pub struct InMemoryWordStore {
    words: RwLock<Vec<String>>,
}

impl InMemoryWordStore {
    pub fn new() -> Self {
        InMemoryWordStore::default()
    }

    pub fn with_words(words: Vec<String>) -> Self {
        InMemoryWordStore {
            words: RwLock::new(words),
        }
    }
}

#[async_trait]
impl WordStore for InMemoryWordStore {
    async fn get_words(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.words.read().await.clone())
    }

    async fn add_word(&self, word: &str) -> Result<(), StoreError> {
        self.words.write().await.push(word.to_string());
        Ok(())
    }

    async fn remove_word(&self, word: &str) -> Result<(), StoreError> {
        self.words.write().await.retain(|stored| stored != word);
        Ok(())
    }

    async fn remove_all_words(&self) -> Result<(), StoreError> {
        self.words.write().await.clear();
        Ok(())
    }
}

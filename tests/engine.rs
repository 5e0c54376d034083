use std::sync::Arc;

use async_trait::async_trait;

use boulette::config::GameSettings;
use boulette::error::{domain_error::DomainError, Error};
use boulette::player::Player;
use boulette::store::memory::{InMemoryPlayerStore, InMemoryWordStore};
use boulette::store::{PlayerStore, StoreError};
use boulette::{GameActor, GameClient, GameWideEvent, GameWideEventReceiver, RoundFsmState};

fn player(id: u32, team: u32) -> Player {
    Player {
        id,
        name: format!("player{id}"),
        points: 0,
        team,
    }
}

fn two_full_teams() -> Vec<Player> {
    vec![player(1, 1), player(2, 1), player(3, 2), player(4, 2)]
}

fn words() -> Vec<String> {
    vec!["summer", "space", "dog", "pizza"]
        .iter()
        .map(|word| word.to_string())
        .collect()
}

fn settings() -> GameSettings {
    GameSettings {
        number_of_teams: 2,
        words_per_person: 4,
        seconds_per_word: 15,
        inactivity_timeout_seconds: 300,
    }
}

fn spawn_game(
    settings: GameSettings,
    players: Vec<Player>,
    words: Vec<String>,
) -> (GameClient, Arc<InMemoryPlayerStore>, Arc<InMemoryWordStore>) {
    let player_store = Arc::new(InMemoryPlayerStore::with_players(players));
    let word_store = Arc::new(InMemoryWordStore::with_words(words));
    let client = GameActor::spawn(
        "test-game",
        settings,
        player_store.clone(),
        word_store.clone(),
    );
    (client, player_store, word_store)
}

async fn wait_for_stage(events: &mut GameWideEventReceiver, expected: &RoundFsmState) {
    loop {
        if let GameWideEvent::GameState { stage, .. } = events.next().await.unwrap() {
            if &stage == expected {
                return;
            }
        }
    }
}

async fn wait_for_round_change(events: &mut GameWideEventReceiver) -> u32 {
    loop {
        if let GameWideEvent::RoundChanged { round_number } = events.next().await.unwrap() {
            return round_number;
        }
    }
}

#[tokio::test]
async fn guessing_awards_two_points_to_every_player_on_the_describing_team() {
    let (client, player_store, _) = spawn_game(settings(), two_full_teams(), words());

    client.start_round().await.unwrap();
    client.guess_word().await.unwrap();

    let players = player_store.get_players().await.unwrap();
    assert_eq!(players[0].points, 2);
    assert_eq!(players[1].points, 2);
    assert_eq!(players[2].points, 0);
    assert_eq!(players[3].points, 0);
}

#[tokio::test]
async fn passing_a_word_does_not_change_any_points() {
    let (client, player_store, _) = spawn_game(settings(), two_full_teams(), words());

    client.start_round().await.unwrap();
    client.pass_word().await.unwrap();

    let players = player_store.get_players().await.unwrap();
    assert!(players.iter().all(|player| player.points == 0));
}

#[tokio::test]
async fn guessing_through_the_deck_advances_to_the_next_round() {
    let (client, player_store, _) = spawn_game(settings(), two_full_teams(), words());
    let mut events = client.subscribe().await.unwrap();

    client.start_round().await.unwrap();
    for _ in 0..words().len() {
        client.guess_word().await.unwrap();
    }

    assert_eq!(wait_for_round_change(&mut events).await, 1);
    wait_for_stage(&mut events, &RoundFsmState::Intro).await;

    // Team 1 held the turn for the whole round: 4 guesses, 2 points each.
    let players = player_store.get_players().await.unwrap();
    assert_eq!(players[0].points, 8);
    assert_eq!(players[1].points, 8);
    assert_eq!(players[2].points, 0);

    let scores = client.team_scores().await.unwrap();
    assert_eq!(scores[0].total_points, 16);
    assert_eq!(scores[1].total_points, 0);
}

#[tokio::test]
async fn exhausting_the_last_round_ends_in_the_result_stage() {
    let (client, _, _) = spawn_game(settings(), two_full_teams(), words());
    let mut events = client.subscribe().await.unwrap();

    for _ in 0..2 {
        client.start_round().await.unwrap();
        for _ in 0..words().len() {
            client.guess_word().await.unwrap();
        }
    }

    wait_for_stage(&mut events, &RoundFsmState::Result).await;
}

#[tokio::test]
async fn starting_with_an_invalid_team_assignment_is_refused() {
    let players = vec![player(1, 1), player(2, 1), player(3, 2)];
    let (client, _, _) = spawn_game(settings(), players, words());
    let mut events = client.subscribe().await.unwrap();

    let result = client.start_round().await;

    assert_eq!(
        result,
        Err(Error::Domain(DomainError::NotEnoughPlayersInTeam {
            team: 2,
            actual: 1,
            minimum: 2
        }))
    );
    // The refused transition still publishes the unchanged state.
    if let GameWideEvent::GameState {
        stage,
        round_number,
        ..
    } = events.next().await.unwrap()
    {
        assert_eq!(stage, RoundFsmState::Intro);
        assert_eq!(round_number, 0);
    } else {
        panic!("expected a GameState event");
    }
}

#[tokio::test]
async fn reset_game_restores_round_zero_and_clears_all_points() {
    let (client, player_store, _) = spawn_game(settings(), two_full_teams(), words());
    let mut events = client.subscribe().await.unwrap();
    client.start_round().await.unwrap();
    client.guess_word().await.unwrap();

    client.reset_game().await.unwrap();

    wait_for_stage(&mut events, &RoundFsmState::Intro).await;
    let players = player_store.get_players().await.unwrap();
    assert!(players.iter().all(|player| player.points == 0));

    // A fresh round can be started after the reset.
    client.start_round().await.unwrap();
    wait_for_stage(&mut events, &RoundFsmState::Play).await;
}

#[tokio::test(start_paused = true)]
async fn timer_expiry_rotates_the_team_and_exhaustion_ends_the_round() {
    let settings = GameSettings {
        number_of_teams: 2,
        words_per_person: 1,
        seconds_per_word: 15,
        inactivity_timeout_seconds: 300,
    };
    let two_words = vec!["summer".to_string(), "space".to_string()];
    let (client, _, _) = spawn_game(settings, two_full_teams(), two_words);
    let mut events = client.subscribe().await.unwrap();

    client.start_round().await.unwrap();

    // First expiry after 15 ticks: the deck still has a word, the turn
    // rotates to team 2 with a fresh countdown.
    loop {
        if let GameWideEvent::GameState {
            stage,
            current_team,
            time_left,
            ..
        } = events.next().await.unwrap()
        {
            assert_eq!(stage, RoundFsmState::Play);
            if current_team == 2 {
                assert_eq!(time_left, 15);
                break;
            }
            assert!(time_left <= 15);
        }
    }

    // Second expiry: the deck is exhausted, the round advances.
    assert_eq!(wait_for_round_change(&mut events).await, 1);
    wait_for_stage(&mut events, &RoundFsmState::Intro).await;
}

#[tokio::test]
async fn closing_the_session_broadcasts_the_finished_stage() {
    let (client, _, _) = spawn_game(settings(), two_full_teams(), words());
    let mut events = client.subscribe().await.unwrap();

    client.close().await.unwrap();

    wait_for_stage(&mut events, &RoundFsmState::Finished).await;
    // The actor is gone, further commands fail.
    assert!(client.start_round().await.is_err());
}

struct UnavailablePlayerStore;

#[async_trait]
impl PlayerStore for UnavailablePlayerStore {
    async fn get_players(&self) -> Result<Vec<Player>, StoreError> {
        Err(StoreError::Unavailable("player store is down".to_string()))
    }

    async fn add_player(&self, _player: Player) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("player store is down".to_string()))
    }

    async fn remove_player(&self, _player_id: u32) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("player store is down".to_string()))
    }

    async fn update_points(&self, _player_id: u32, _points: i64) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("player store is down".to_string()))
    }

    async fn assign_team(&self, _player_id: u32, _team: u32) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("player store is down".to_string()))
    }

    async fn reset_points(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("player store is down".to_string()))
    }
}

#[tokio::test]
async fn store_failure_at_round_start_leaves_the_stage_unchanged() {
    let word_store = Arc::new(InMemoryWordStore::with_words(words()));
    let client = GameActor::spawn(
        "test-game",
        settings(),
        Arc::new(UnavailablePlayerStore),
        word_store,
    );
    let mut events = client.subscribe().await.unwrap();

    let result = client.start_round().await;

    assert_eq!(
        result,
        Err(Error::Store(StoreError::Unavailable(
            "player store is down".to_string()
        )))
    );
    if let GameWideEvent::GameState { stage, .. } = events.next().await.unwrap() {
        assert_eq!(stage, RoundFsmState::Intro);
    } else {
        panic!("expected a GameState event");
    }
}

#[tokio::test]
async fn unassigned_players_are_excluded_from_team_scores() {
    let mut players = two_full_teams();
    players.push(player(5, 0));
    let (client, player_store, _) = spawn_game(settings(), players, words());

    player_store.update_points(5, 99).await.unwrap();
    let scores = client.team_scores().await.unwrap();

    assert_eq!(scores.len(), 2);
    assert!(scores.iter().all(|score| score.total_points == 0));
}

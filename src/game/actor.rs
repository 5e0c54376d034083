use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::SendError;
use tokio::sync::oneshot::Sender as OneshotSender;
use tokio::sync::{
    broadcast, mpsc,
    mpsc::{Receiver, Sender},
};
use tokio::time;

use crate::config::GameSettings;
use crate::error::Error;
use crate::game::actor_client::GameClient;
use crate::game::round_fsm::RoundFsmState;
use crate::game::Game;
use crate::metrics::{ACTIVE_SESSIONS, WORDS_GUESSED};
use crate::score::{self, TeamScore};
use crate::store::{PlayerStore, WordStore};
use crate::timer::{TimerEvent, TurnTimer};

/// Session actor. Owns the synchronous game core, the turn timer, and the
/// injected store collaborators; processes client commands and timer events
/// one at a time and broadcasts the resulting state after each of them.
pub struct GameActor {
    game: Game,
    settings: GameSettings,
    player_store: Arc<dyn PlayerStore>,
    word_store: Arc<dyn WordStore>,
    game_rx: Receiver<GameCommand>,
    timer_rx: Receiver<TimerEvent>,
    timer_tx: Sender<TimerEvent>,
    timer: TurnTimer,
    timer_turn: Option<u64>,
    broadcast_tx: broadcast::Sender<GameWideEvent>,
    inactivity_timeout: Duration,
}

enum Input {
    Command(GameCommand),
    Timer(TimerEvent),
    Closed,
}

impl GameActor {
    /// Runs the session actor in background and returns a client to
    /// communicate with it.
    pub fn spawn(
        id: &str,
        settings: GameSettings,
        player_store: Arc<dyn PlayerStore>,
        word_store: Arc<dyn WordStore>,
    ) -> GameClient {
        let game = Game::new(id, settings.clone());
        let (game_tx, game_rx): (Sender<GameCommand>, Receiver<GameCommand>) = mpsc::channel(128);
        let (timer_tx, timer_rx): (Sender<TimerEvent>, Receiver<TimerEvent>) = mpsc::channel(128);
        let (broadcast_tx, _): (
            broadcast::Sender<GameWideEvent>,
            broadcast::Receiver<GameWideEvent>,
        ) = broadcast::channel(32);

        let inactivity_timeout = settings.inactivity_timeout();
        tokio::spawn(
            GameActor {
                game,
                settings,
                player_store,
                word_store,
                game_rx,
                timer_rx,
                timer_tx,
                timer: TurnTimer::new(),
                timer_turn: None,
                broadcast_tx,
                inactivity_timeout,
            }
            .start(),
        );

        GameClient { game_tx }
    }

    async fn start(mut self) {
        ACTIVE_SESSIONS.inc();

        loop {
            let round_before = self.game.round_number();
            match time::timeout(self.inactivity_timeout, self.next_input()).await {
                Err(_) => {
                    if self.game.playing_team().is_none() {
                        log::info!(
                            "No activity detected in game {} after {} seconds. Stopping session actor.",
                            self.game.id(),
                            self.inactivity_timeout.as_secs()
                        );
                        break;
                    }
                }
                Ok(Input::Closed) => {
                    log::info!("Game channel has been dropped. Stopping session actor.");
                    break;
                }
                Ok(Input::Command(command)) => {
                    let stop = self.handle_command(command).await;
                    self.sync_timer();
                    self.publish_state(round_before);
                    if stop {
                        break;
                    }
                }
                Ok(Input::Timer(event)) => {
                    self.handle_timer_event(event);
                    self.sync_timer();
                    self.publish_state(round_before);
                }
            }
        }

        self.stop_session();
        ACTIVE_SESSIONS.dec();
    }

    async fn next_input(&mut self) -> Input {
        tokio::select! {
            command = self.game_rx.recv() => match command {
                Some(command) => Input::Command(command),
                None => Input::Closed,
            },
            event = self.timer_rx.recv() => match event {
                Some(event) => Input::Timer(event),
                // The actor keeps a sender, this branch cannot be reached.
                None => Input::Closed,
            },
        }
    }

    async fn handle_command(&mut self, command: GameCommand) -> bool {
        match command {
            GameCommand::Subscribe { response_tx } => {
                GameActor::respond(
                    response_tx,
                    GameEvent::Subscribed {
                        broadcast_rx: self.broadcast_tx.subscribe(),
                    },
                );
            }
            GameCommand::StartRound { response_tx } => {
                let result = self.start_round().await;
                GameActor::respond_with_result(response_tx, result);
            }
            GameCommand::GuessWord { response_tx } => {
                let result = self.guess_word().await;
                GameActor::respond_with_result(response_tx, result);
            }
            GameCommand::PassWord { response_tx } => {
                let result = self.game.next_word();
                GameActor::respond_with_result(response_tx, result);
            }
            GameCommand::EndTurn { response_tx } => {
                // Cancelling first guarantees that a pending expiry and the
                // manual trigger cannot both advance the same turn.
                self.timer.cancel();
                self.timer_turn = None;
                let result = self.game.end_turn();
                GameActor::respond_with_result(response_tx, result);
            }
            GameCommand::ResetGame { response_tx } => {
                let result = self.reset_game().await;
                GameActor::respond_with_result(response_tx, result);
            }
            GameCommand::GetTeamScores { response_tx } => {
                let event = match self.team_scores().await {
                    Ok(scores) => GameEvent::TeamScores { scores },
                    Err(error) => GameEvent::Error { error },
                };
                GameActor::respond(response_tx, event);
            }
            GameCommand::CloseSession => return true,
        }
        false
    }

    fn handle_timer_event(&mut self, event: TimerEvent) {
        // A countdown that outlived its turn must never mutate the game.
        if event.turn() != self.game.turn() {
            return;
        }
        match event {
            TimerEvent::Tick { remaining, .. } => self.game.set_time_left(remaining),
            TimerEvent::Expired { .. } => {
                // The expired task has already stopped, cancel stays idempotent.
                self.timer.cancel();
                self.timer_turn = None;
                if let Err(error) = self.game.end_turn() {
                    log::error!(
                        "Timer expiry could not advance the turn. GameId: '{}', Error: '{error}'.",
                        self.game.id()
                    );
                }
            }
        }
    }

    /// Keeps the countdown aligned with the game: a running turn gets a
    /// timer for its generation, every other stage gets none. Called after
    /// every processed input, so no transition out of play can leave a
    /// dangling countdown behind.
    fn sync_timer(&mut self) {
        match self.game.playing_team() {
            Some(_) => {
                if self.timer_turn != Some(self.game.turn()) {
                    self.timer
                        .start(self.game.turn(), self.game.time_left(), self.timer_tx.clone());
                    self.timer_turn = Some(self.game.turn());
                }
            }
            None => {
                self.timer.cancel();
                self.timer_turn = None;
            }
        }
    }

    async fn start_round(&mut self) -> Result<(), Error> {
        // Store failures leave the game in its prior stage, the deck is only
        // loaded once both collaborators have answered.
        let players = self.player_store.get_players().await?;
        let words = self.word_store.get_words().await?;
        self.game.start_round(&players, words)
    }

    async fn guess_word(&mut self) -> Result<(), Error> {
        let team = match self.game.playing_team() {
            // A stale guess after a transition is ignored, not an error.
            None => return Ok(()),
            Some(team) => team,
        };

        let players = self.player_store.get_players().await?;
        for player in players.iter().filter(|player| player.is_on_team(team)) {
            self.player_store
                .update_points(player.id, player.points + Game::POINTS_PER_GUESS)
                .await?;
        }
        WORDS_GUESSED.inc();

        self.game.next_word()
    }

    async fn reset_game(&mut self) -> Result<(), Error> {
        self.player_store.reset_points().await?;
        self.game.reset_game()
    }

    async fn team_scores(&self) -> Result<Vec<TeamScore>, Error> {
        let players = self.player_store.get_players().await?;
        Ok(score::calculate_team_scores(
            &players,
            self.settings.number_of_teams,
        ))
    }

    fn publish_state(&self, round_before: u32) {
        if self.game.round_number() != round_before {
            let _ = self.broadcast_tx.send(GameWideEvent::RoundChanged {
                round_number: self.game.round_number(),
            });
        }
        let _ = self.send_game_state();
    }

    fn send_game_state(&self) -> Result<usize, SendError<GameWideEvent>> {
        self.broadcast_tx.send(GameWideEvent::GameState {
            stage: self.game.state().clone(),
            round_number: self.game.round_number(),
            current_team: self.game.current_team(),
            time_left: self.game.time_left(),
            current_word: self.game.current_word().map(str::to_string),
        })
    }

    fn stop_session(&mut self) {
        self.timer.cancel();
        self.timer_turn = None;
        if let Err(error) = self.game.close_session() {
            log::error!(
                "Could not finish the game on session shutdown. GameId: '{}', Error: '{error}'.",
                self.game.id()
            );
        }
        let _ = self.send_game_state();
    }

    fn respond(response_tx: OneshotSender<GameEvent>, event: GameEvent) {
        if let Err(event) = response_tx.send(event) {
            log::error!(
                "Sent a GameEvent but the response channel is closed. Event: '{event}'."
            );
        }
    }

    fn respond_with_result(response_tx: OneshotSender<GameEvent>, result: Result<(), Error>) {
        let event = match result {
            Ok(()) => GameEvent::Ok,
            Err(error) => GameEvent::Error { error },
        };
        GameActor::respond(response_tx, event);
    }
}

pub(crate) enum GameCommand {
    Subscribe {
        response_tx: OneshotSender<GameEvent>,
    },
    StartRound {
        response_tx: OneshotSender<GameEvent>,
    },
    GuessWord {
        response_tx: OneshotSender<GameEvent>,
    },
    PassWord {
        response_tx: OneshotSender<GameEvent>,
    },
    EndTurn {
        response_tx: OneshotSender<GameEvent>,
    },
    ResetGame {
        response_tx: OneshotSender<GameEvent>,
    },
    GetTeamScores {
        response_tx: OneshotSender<GameEvent>,
    },
    CloseSession,
}

#[derive(Debug)]
pub(crate) enum GameEvent {
    Subscribed {
        broadcast_rx: broadcast::Receiver<GameWideEvent>,
    },
    Ok,
    TeamScores {
        scores: Vec<TeamScore>,
    },
    Error {
        error: Error,
    },
}

impl Display for GameEvent {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                GameEvent::Subscribed { .. } => "GameEvent::Subscribed".to_string(),
                GameEvent::Ok => "GameEvent::Ok".to_string(),
                GameEvent::TeamScores { .. } => "GameEvent::TeamScores".to_string(),
                GameEvent::Error { error } => format!("Error '{error}'"),
            }
        )
    }
}

/// Snapshot and notification stream delivered to subscribed listeners.
#[derive(Clone, Debug)]
pub enum GameWideEvent {
    GameState {
        stage: RoundFsmState,
        round_number: u32,
        current_team: u32,
        time_left: u32,
        current_word: Option<String>,
    },
    RoundChanged {
        round_number: u32,
    },
}

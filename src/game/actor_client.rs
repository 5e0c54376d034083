use tokio::sync::broadcast;
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Receiver as OneshotReceiver, Sender as OneshotSender};

use crate::error::Error;
use crate::game::actor::{GameCommand, GameEvent, GameWideEvent};
use crate::score::TeamScore;

/// Cloneable handle to a running game session.
#[derive(Clone, Debug)]
pub struct GameClient {
    pub(super) game_tx: Sender<GameCommand>,
}

impl GameClient {
    /// Registers a listener on the session's notification stream. Dropping
    /// the returned receiver deregisters it.
    pub async fn subscribe(&self) -> Result<GameWideEventReceiver, Error> {
        match self
            .send_command(|response_tx| GameCommand::Subscribe { response_tx })
            .await?
        {
            GameEvent::Subscribed { broadcast_rx } => Ok(GameWideEventReceiver { broadcast_rx }),
            GameEvent::Error { error } => Err(error),
            event => Err(GameClient::unexpected_event(&event)),
        }
    }

    pub async fn start_round(&self) -> Result<(), Error> {
        self.send_unit_command(|response_tx| GameCommand::StartRound { response_tx })
            .await
    }

    /// The describing team guessed the current word: +2 points per team
    /// member, then the next word is drawn.
    pub async fn guess_word(&self) -> Result<(), Error> {
        self.send_unit_command(|response_tx| GameCommand::GuessWord { response_tx })
            .await
    }

    /// The current word is passed without scoring, the next one is drawn.
    pub async fn pass_word(&self) -> Result<(), Error> {
        self.send_unit_command(|response_tx| GameCommand::PassWord { response_tx })
            .await
    }

    pub async fn end_turn(&self) -> Result<(), Error> {
        self.send_unit_command(|response_tx| GameCommand::EndTurn { response_tx })
            .await
    }

    pub async fn reset_game(&self) -> Result<(), Error> {
        self.send_unit_command(|response_tx| GameCommand::ResetGame { response_tx })
            .await
    }

    pub async fn team_scores(&self) -> Result<Vec<TeamScore>, Error> {
        match self
            .send_command(|response_tx| GameCommand::GetTeamScores { response_tx })
            .await?
        {
            GameEvent::TeamScores { scores } => Ok(scores),
            GameEvent::Error { error } => Err(error),
            event => Err(GameClient::unexpected_event(&event)),
        }
    }

    /// Tears the session down. The actor cancels any running countdown,
    /// broadcasts the finished stage, and stops.
    pub async fn close(&self) -> Result<(), Error> {
        self.game_tx
            .send(GameCommand::CloseSession)
            .await
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "Tried to send GameCommand::CloseSession but the session actor is not listening. Error: '{error}'."
                ))
            })
    }

    async fn send_unit_command(
        &self,
        command: impl FnOnce(OneshotSender<GameEvent>) -> GameCommand,
    ) -> Result<(), Error> {
        match self.send_command(command).await? {
            GameEvent::Ok => Ok(()),
            GameEvent::Error { error } => Err(error),
            event => Err(GameClient::unexpected_event(&event)),
        }
    }

    async fn send_command(
        &self,
        command: impl FnOnce(OneshotSender<GameEvent>) -> GameCommand,
    ) -> Result<GameEvent, Error> {
        let (response_tx, response_rx): (OneshotSender<GameEvent>, OneshotReceiver<GameEvent>) =
            oneshot::channel();

        self.game_tx
            .send(command(response_tx))
            .await
            .map_err(|error| {
                Error::log_and_create_internal(&format!(
                    "The session is not alive. Can't send the command. Error: '{error}'."
                ))
            })?;

        response_rx.await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "Sent a GameCommand but the session actor dropped the response channel. Error: '{error}'."
            ))
        })
    }

    fn unexpected_event(event: &GameEvent) -> Error {
        Error::log_and_create_internal(&format!(
            "The session actor responded with an unexpected event. Event: '{event}'."
        ))
    }
}

pub struct GameWideEventReceiver {
    broadcast_rx: broadcast::Receiver<GameWideEvent>,
}

impl GameWideEventReceiver {
    pub async fn next(&mut self) -> Result<GameWideEvent, Error> {
        self.broadcast_rx.recv().await.map_err(|error| {
            Error::log_and_create_internal(&format!(
                "The broadcast channel with the game session has been closed. Error: '{error}'."
            ))
        })
    }
}

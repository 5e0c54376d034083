pub mod actor;
pub mod actor_client;
pub mod round_fsm;

use rust_fsm::StateMachine;

use crate::config::GameSettings;
use crate::deck::WordDeck;
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::game::round_fsm::{RoundFsm, RoundFsmInput, RoundFsmState};
use crate::player::Player;
use crate::score;
use crate::team;

/// Synchronous round/turn core of a game session. Owns the stage machine,
/// the word deck of the active round, and the turn countdown value. Player
/// and word persistence stay outside, the session actor passes their
/// contents in and applies score updates through the player store.
pub struct Game {
    id: String,
    fsm: StateMachine<RoundFsm>,
    deck: WordDeck,
    settings: GameSettings,
    round_number: u32,
    current_team: u32,
    time_left: u32,
    current_word: Option<String>,
    turn: u64,
}

impl Game {
    /// Rounds are numbered 0 and 1; exhausting the round-1 deck ends the game.
    const LAST_ROUND: u32 = 1;
    const INITIAL_TEAM: u32 = 1;
    pub const POINTS_PER_GUESS: i64 = 2;

    pub fn new(id: &str, settings: GameSettings) -> Self {
        Self {
            id: id.to_string(),
            fsm: StateMachine::default(),
            deck: WordDeck::new(),
            settings,
            round_number: 0,
            current_team: Game::INITIAL_TEAM,
            time_left: 0,
            current_word: None,
            turn: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &RoundFsmState {
        self.fsm.state()
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn current_team(&self) -> u32 {
        self.current_team
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn current_word(&self) -> Option<&str> {
        self.current_word.as_deref()
    }

    /// Monotonic turn generation. Bumped whenever a countdown would become
    /// stale (turn advance, round boundary, reset, close), so timer events
    /// from a previous turn can be recognized and dropped.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// The team currently describing words, or `None` outside the play stage.
    pub fn playing_team(&self) -> Option<u32> {
        if self.state() == &RoundFsmState::Play {
            Some(self.current_team)
        } else {
            None
        }
    }

    /// Starts the current round: validates the team assignment, loads the
    /// deck from the given words, and enters the play stage with team 1 and
    /// a full countdown. Refused without any state change when the teams are
    /// invalid or the game is not at a round intro.
    pub fn start_round(&mut self, players: &[Player], words: Vec<String>) -> Result<(), Error> {
        if self.state() != &RoundFsmState::Intro {
            return Err(Error::Domain(DomainError::InvalidStageForStartingRound(
                self.state().clone(),
                RoundFsmState::Intro,
            )));
        }
        score::validate_team_assignment(players, self.settings.number_of_teams)?;

        self.deck.load(words);
        self.current_team = Game::INITIAL_TEAM;
        self.time_left = self.settings.turn_seconds();
        self.turn += 1;
        self.process_event(&RoundFsmInput::StartRound)?;
        self.next_word()
    }

    /// Draws the next word for the describing team. On deck exhaustion the
    /// round ends: the game moves to the next round's intro, or to the
    /// result stage after the last round. Ignored outside the play stage so
    /// stale presentation events are harmless.
    pub fn next_word(&mut self) -> Result<(), Error> {
        if self.state() != &RoundFsmState::Play {
            return Ok(());
        }
        match self.deck.draw_next() {
            Some(word) => {
                self.current_word = Some(word);
                Ok(())
            }
            None => self.finish_round(),
        }
    }

    /// Countdown update from the turn timer. Ignored outside the play stage.
    pub fn set_time_left(&mut self, remaining: u32) {
        if self.state() == &RoundFsmState::Play {
            self.time_left = remaining;
        }
    }

    /// Turn boundary, reached on timer expiry or a manual end-of-turn. While
    /// the deck still has words the turn passes to the next team with a
    /// fresh countdown; an exhausted deck ends the round instead. Ignored
    /// outside the play stage.
    pub fn end_turn(&mut self) -> Result<(), Error> {
        if self.state() != &RoundFsmState::Play {
            return Ok(());
        }
        if self.deck.is_exhausted() {
            self.finish_round()
        } else {
            self.current_team = team::next_team(self.current_team, self.settings.number_of_teams)?;
            self.time_left = self.settings.turn_seconds();
            self.turn += 1;
            self.process_event(&RoundFsmInput::NextTurn)?;
            self.next_word()
        }
    }

    /// Returns the game to the intro of round 0 with an empty deck. The
    /// session actor resets the stored player points before calling this.
    pub fn reset_game(&mut self) -> Result<(), Error> {
        self.process_event(&RoundFsmInput::ResetGame)?;
        self.deck.load(Vec::new());
        self.round_number = 0;
        self.current_team = Game::INITIAL_TEAM;
        self.time_left = 0;
        self.current_word = None;
        self.turn += 1;
        Ok(())
    }

    /// Final transition on session teardown. No operation mutates the game
    /// afterwards.
    pub fn close_session(&mut self) -> Result<(), Error> {
        self.process_event(&RoundFsmInput::CloseSession)?;
        self.time_left = 0;
        self.current_word = None;
        self.turn += 1;
        Ok(())
    }

    fn finish_round(&mut self) -> Result<(), Error> {
        self.current_word = None;
        self.time_left = 0;
        self.deck.reset();
        self.turn += 1;
        self.process_event(&RoundFsmInput::DeckExhausted)
    }

    fn process_event(&mut self, event: &RoundFsmInput) -> Result<(), Error> {
        match self.fsm.consume(event) {
            Ok(_) => match self.fsm.state() {
                RoundFsmState::AdvancingRound => {
                    if self.round_number < Game::LAST_ROUND {
                        self.round_number += 1;
                        self.process_event(&RoundFsmInput::NextRound)
                    } else {
                        self.process_event(&RoundFsmInput::NoMoreRounds)
                    }
                }
                _ => Ok(()),
            },
            Err(error) => Err(Error::log_and_create_internal(&format!(
                "The fsm in state {:?} can't transition with an event {:?}. Error: '{error}'.",
                self.fsm.state(),
                event
            ))),
        }
    }
}

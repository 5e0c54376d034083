use std::fmt;

use rust_fsm::state_machine;

/*
 * Intro
 * Play
 *    Turn countdown per team
 *    Timer expiry rotates the team while the deck has words
 *    Deck exhaustion ends the round
 * Result
 * Finished (session closed)
 */
state_machine! {
    derive(Debug, Clone, PartialEq)
    pub RoundFsm(Intro)

    Intro => {
        StartRound => Play,
        ResetGame => Intro,
        CloseSession => Finished,
    },
    Play => {
        NextTurn => Play,
        DeckExhausted => AdvancingRound,
        ResetGame => Intro,
        CloseSession => Finished,
    },
    AdvancingRound => {
        NextRound => Intro,
        NoMoreRounds => Result,
    },
    Result => {
        ResetGame => Intro,
        CloseSession => Finished,
    }
}

impl fmt::Display for RoundFsmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

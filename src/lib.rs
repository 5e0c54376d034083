#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod deck;
pub mod error;
pub mod game;
pub mod metrics;
pub mod player;
pub mod score;
pub mod store;
pub mod team;
pub mod timer;

pub use game::actor::{GameActor, GameWideEvent};
pub use game::actor_client::{GameClient, GameWideEventReceiver};
pub use game::round_fsm::RoundFsmState;
pub use game::Game;

//! # RaceTo21 core
//!
//! Game rules and match state machine for RaceTo21, a simplified
//! blackjack-style card game for a table of players. Players bet into a
//! pot, draw cards one at a time and try to hit 21 without going over.
//!
//! The crate does no I/O of its own: a [`GameEngine`] drives the match and
//! talks to the players through a [`Table`], dealing from a [`Deck`].
//! Front ends plug in their own table (a terminal console, a scripted
//! replay) without touching the rules.

mod card;
mod config;
mod deck;
mod error;
mod logic;
mod rng;
mod round;
mod scoring;
mod state;
mod table;
mod tournament;

pub use card::*;
pub use config::*;
pub use deck::*;
pub use error::*;

pub use logic::*;
pub use rng::*;

pub use round::*;
pub use scoring::*;
pub use state::*;
pub use table::*;
pub use tournament::*;

use std::io;
use thiserror::Error;

/// A bet the player cannot place. The engine re-asks until a bet succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    #[error("You have to bet an amount.")]
    NotPositive,
    #[error("Your cash: {cash} is not enough.")]
    InsufficientCash { cash: u32 },
    #[error("That bet is more than the pot can hold.")]
    PotOverflow,
}

/// Failures of the table collaborator (console I/O and the like).
#[derive(Debug, Error)]
pub enum TableError {
    #[error("table input closed")]
    InputClosed,
    #[error("table I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Errors that stop a match.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("deck is empty")]
    DeckExhausted,
    #[error("internal consistency error: round ended without a winner")]
    NoRoundWinner,
    #[error("internal consistency error: no players left in the turn order")]
    EmptyTurnOrder,
    #[error("{player}'s cash would overflow when paid {amount}")]
    CashOverflow { player: String, amount: u32 },
    #[error("match is already over")]
    MatchOver,
    #[error(transparent)]
    Table(#[from] TableError),
}

impl GameError {
    /// `true` for states the engine should never be able to reach.
    pub fn is_internal(&self) -> bool {
        !matches!(self, GameError::Table(_))
    }
}

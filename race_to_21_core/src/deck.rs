use crate::card::{Card, Rank, Suit};
use crate::error::GameError;
use crate::rng::GameRng;
use std::collections::VecDeque;
use tracing::trace;

/// Source of cards for a match.
///
/// The engine deals from the top, rebuilds the deck between rounds and
/// shuffles it through the match's [`GameRng`].
pub trait Deck {
    /// Remove and return the top card.
    fn deal_top(&mut self) -> Result<Card, GameError>;

    fn shuffle(&mut self, rng: &mut GameRng);

    /// Replace the contents with a fresh deck for the next round.
    fn rebuild(&mut self);

    fn remaining(&self) -> usize;
}

// --- 52-card deck ---

/// Create a full 52-card deck, ordered by rank then suit.
fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for &rank in &Rank::ALL {
        for &suit in &Suit::ALL {
            deck.push(Card { rank, suit });
        }
    }
    deck
}

/// The standard 52-card deck. The top of the deck is the end of the vector.
#[derive(Debug, Clone)]
pub struct StandardDeck {
    cards: Vec<Card>,
}

impl StandardDeck {
    pub const SIZE: usize = 52;

    pub fn new() -> Self {
        Self { cards: create_deck() }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl Default for StandardDeck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck for StandardDeck {
    fn deal_top(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::DeckExhausted)
    }

    fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
        trace!(deck = ?self.cards.iter().map(Card::id).collect::<Vec<_>>(), "deck shuffled");
    }

    fn rebuild(&mut self) {
        self.cards = create_deck();
    }

    fn remaining(&self) -> usize {
        self.cards.len()
    }
}

// --- Pre-arranged deck ---

/// A deck that deals pre-arranged cards, one stack per round.
///
/// Shuffling is a no-op, so a match can be replayed card for card.
/// `rebuild` moves on to the next round's stack (an empty one if the
/// script has run out).
#[derive(Debug, Clone, Default)]
pub struct StackedDeck {
    current: VecDeque<Card>,
    upcoming: VecDeque<Vec<Card>>,
}

impl StackedDeck {
    /// `rounds[0]` is dealt in round 1, front to back; `rounds[1]` after the first rebuild, etc.
    pub fn new(rounds: Vec<Vec<Card>>) -> Self {
        let mut upcoming: VecDeque<Vec<Card>> = rounds.into();
        let current = upcoming.pop_front().unwrap_or_default().into();
        Self { current, upcoming }
    }
}

impl Deck for StackedDeck {
    fn deal_top(&mut self) -> Result<Card, GameError> {
        self.current.pop_front().ok_or(GameError::DeckExhausted)
    }

    fn shuffle(&mut self, _rng: &mut GameRng) {}

    fn rebuild(&mut self) {
        self.current = self.upcoming.pop_front().unwrap_or_default().into();
    }

    fn remaining(&self) -> usize {
        self.current.len()
    }
}

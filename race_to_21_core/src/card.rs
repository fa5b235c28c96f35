use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// --- Core data types ---

/// Suit
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Suit {
    Spade,
    Heart,
    Club,
    Diamond,
}

/// Rank
/// Ace is always the lowest card; there is no high-ace variant in this game.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

/// A single playing card.
///
/// The card's identity is its short id (`"7D"`, `"10H"`, `"QS"`), and
/// `display_name` gives the long human label (`"7 of Diamonds"`).
/// Cards are `Copy` and never change once built.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CardParseError {
    #[error("card id is empty")]
    Empty,
    #[error("unknown suit in card id {0:?}")]
    UnknownSuit(String),
    #[error("unknown rank in card id {0:?}")]
    UnknownRank(String),
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Club, Suit::Diamond];

    pub fn letter(self) -> char {
        match self {
            Suit::Spade => 'S',
            Suit::Heart => 'H',
            Suit::Club => 'C',
            Suit::Diamond => 'D',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Suit::Spade => "Spades",
            Suit::Heart => "Hearts",
            Suit::Club => "Clubs",
            Suit::Diamond => "Diamonds",
        }
    }

    fn from_letter(letter: char) -> Option<Suit> {
        Suit::ALL.into_iter().find(|s| s.letter() == letter)
    }
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven,
        Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King,
    ];

    /// The rank part of a card id: `A`, `2`..`10`, `J`, `Q`, `K`.
    pub fn code(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
            pip => pip.code(),
        }
    }

    fn from_code(code: &str) -> Option<Rank> {
        Rank::ALL.into_iter().find(|r| r.code() == code)
    }
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Short identity, e.g. `7D`.
    pub fn id(&self) -> String {
        format!("{}{}", self.rank.code(), self.suit.letter())
    }

    /// Human label, e.g. `7 of Diamonds`.
    pub fn display_name(&self) -> String {
        format!("{} of {}", self.rank.name(), self.suit.name())
    }
}

// --- Display / parsing ---

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Parses a short card id such as `AS`, `10H` or `qd`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_uppercase();
        let suit_letter = id.chars().last().ok_or(CardParseError::Empty)?;
        let suit = Suit::from_letter(suit_letter).ok_or_else(|| CardParseError::UnknownSuit(s.to_string()))?;
        let rank_code = &id[..id.len() - suit_letter.len_utf8()];
        let rank = Rank::from_code(rank_code).ok_or_else(|| CardParseError::UnknownRank(s.to_string()))?;
        Ok(Card { rank, suit })
    }
}

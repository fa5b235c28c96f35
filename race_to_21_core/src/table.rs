//! The table: everything the engine needs from the people playing.
//!
//! The engine never reads input or prints by itself. It asks the table for
//! decisions and tells it what happened. A table is expected to validate
//! its own input (ranges, numbers, Y/N answers) and only hand back
//! well-formed answers; bet affordability is checked by the engine.

use crate::error::TableError;
use crate::state::Player;
use crate::tournament::MatchEndReason;
use std::collections::VecDeque;
use std::ops::RangeInclusive;

pub trait Table {
    fn ask_player_count(&mut self, range: RangeInclusive<usize>) -> Result<usize, TableError>;

    fn ask_win_target(&mut self, range: RangeInclusive<u32>) -> Result<u32, TableError>;

    /// `slot` is 1-based.
    fn ask_player_name(&mut self, slot: usize) -> Result<String, TableError>;

    /// `position` is the player's 1-based seat in this round's turn order.
    fn introduce(&mut self, player: &Player, position: usize) -> Result<(), TableError>;

    fn ask_bet(&mut self, player: &Player) -> Result<u32, TableError>;

    fn ask_wants_card(&mut self, player: &Player) -> Result<bool, TableError>;

    fn ask_continue(&mut self, player: &Player) -> Result<bool, TableError>;

    fn show_hand(&mut self, player: &Player) -> Result<(), TableError>;

    fn show_hands(&mut self, players: &[&Player]) -> Result<(), TableError> {
        for player in players {
            self.show_hand(player)?;
        }
        Ok(())
    }

    fn announce_round_winner(&mut self, player: &Player, amount: u32) -> Result<(), TableError>;

    /// `standings` is the whole roster, best first.
    fn announce_match_end(
        &mut self,
        standings: &[&Player],
        reason: MatchEndReason,
        distinguished: Option<&Player>,
    ) -> Result<(), TableError>;

    fn write_message(&mut self, message: &str) -> Result<(), TableError>;
}

// --- Scripted table ---

/// Final result as seen by a [`ScriptedTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchEndRecord {
    pub standings: Vec<String>,
    pub reason: MatchEndReason,
    pub distinguished: Option<String>,
}

/// A table that plays back pre-recorded answers and records what it was
/// asked and told. Used to replay matches and in tests.
///
/// Running out of answers of a kind is reported as
/// [`TableError::InputClosed`].
#[derive(Debug, Default)]
pub struct ScriptedTable {
    player_count: VecDeque<usize>,
    win_target: VecDeque<u32>,
    names: VecDeque<String>,
    bets: VecDeque<u32>,
    wants_card: VecDeque<bool>,
    continues: VecDeque<bool>,

    /// Every message written through [`Table::write_message`].
    pub messages: Vec<String>,
    /// `(name, position)` for each introduction.
    pub introductions: Vec<(String, usize)>,
    /// Names of the players asked for a bet, in order.
    pub bet_requests: Vec<String>,
    /// Names of the players asked whether they want a card, in order.
    pub card_requests: Vec<String>,
    /// Names of the players asked whether to continue, in order.
    pub continue_requests: Vec<String>,
    /// `(winner, amount)` for each round.
    pub round_winners: Vec<(String, u32)>,
    pub match_end: Option<MatchEndRecord>,
}

impl ScriptedTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(mut self, count: usize) -> Self {
        self.player_count.push_back(count);
        self
    }

    pub fn win_target(mut self, target: u32) -> Self {
        self.win_target.push_back(target);
        self
    }

    pub fn names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.names.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn bets(mut self, bets: impl IntoIterator<Item = u32>) -> Self {
        self.bets.extend(bets);
        self
    }

    pub fn wants_card(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.wants_card.extend(answers);
        self
    }

    pub fn continues(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.continues.extend(answers);
        self
    }
}

fn next<T>(queue: &mut VecDeque<T>) -> Result<T, TableError> {
    queue.pop_front().ok_or(TableError::InputClosed)
}

impl Table for ScriptedTable {
    fn ask_player_count(&mut self, _range: RangeInclusive<usize>) -> Result<usize, TableError> {
        next(&mut self.player_count)
    }

    fn ask_win_target(&mut self, _range: RangeInclusive<u32>) -> Result<u32, TableError> {
        next(&mut self.win_target)
    }

    fn ask_player_name(&mut self, _slot: usize) -> Result<String, TableError> {
        next(&mut self.names)
    }

    fn introduce(&mut self, player: &Player, position: usize) -> Result<(), TableError> {
        self.introductions.push((player.name().to_string(), position));
        Ok(())
    }

    fn ask_bet(&mut self, player: &Player) -> Result<u32, TableError> {
        self.bet_requests.push(player.name().to_string());
        next(&mut self.bets)
    }

    fn ask_wants_card(&mut self, player: &Player) -> Result<bool, TableError> {
        self.card_requests.push(player.name().to_string());
        next(&mut self.wants_card)
    }

    fn ask_continue(&mut self, player: &Player) -> Result<bool, TableError> {
        self.continue_requests.push(player.name().to_string());
        next(&mut self.continues)
    }

    fn show_hand(&mut self, _player: &Player) -> Result<(), TableError> {
        Ok(())
    }

    fn announce_round_winner(&mut self, player: &Player, amount: u32) -> Result<(), TableError> {
        self.round_winners.push((player.name().to_string(), amount));
        Ok(())
    }

    fn announce_match_end(
        &mut self,
        standings: &[&Player],
        reason: MatchEndReason,
        distinguished: Option<&Player>,
    ) -> Result<(), TableError> {
        self.match_end = Some(MatchEndRecord {
            standings: standings.iter().map(|p| p.name().to_string()).collect(),
            reason,
            distinguished: distinguished.map(|p| p.name().to_string()),
        });
        Ok(())
    }

    fn write_message(&mut self, message: &str) -> Result<(), TableError> {
        self.messages.push(message.to_string());
        Ok(())
    }
}

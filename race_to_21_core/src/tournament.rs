//! Deciding when the match is over and ranking the final standings.

use crate::state::Player;
use std::cmp::Ordering;
use std::fmt;

/// Why the match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchEndReason {
    /// A player won the agreed number of rounds.
    WinTarget,
    /// Only one player still in the match has any cash.
    InsufficientCash,
    /// Fewer than two players want to keep playing.
    InsufficientPlayers,
}

impl MatchEndReason {
    /// Stable numeric code for the reason (1, 2 or 3).
    pub fn code(self) -> u8 {
        match self {
            MatchEndReason::WinTarget => 1,
            MatchEndReason::InsufficientCash => 2,
            MatchEndReason::InsufficientPlayers => 3,
        }
    }
}

impl fmt::Display for MatchEndReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            MatchEndReason::WinTarget => "reached the winning target",
            MatchEndReason::InsufficientCash => "is the only player with cash left",
            MatchEndReason::InsufficientPlayers => "not enough players want to keep playing",
        })
    }
}

/// Ordering for the final standings: more cash first, then more wins,
/// then name alphabetically.
pub fn compare_standing(a: &Player, b: &Player) -> Ordering {
    b.cash
        .cmp(&a.cash)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| a.name().cmp(b.name()))
}

/// The whole roster, quit players included, best first.
/// The first entry is the match champion.
pub fn standings(roster: &[Player]) -> Vec<&Player> {
    let mut ranked: Vec<&Player> = roster.iter().collect();
    ranked.sort_by(|a, b| compare_standing(a, b));
    ranked
}

/// Roster index of the only player still in the match with cash left, if
/// there is exactly one.
pub fn forced_winner(roster: &[Player]) -> Option<usize> {
    let mut with_cash = roster
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.has_quit() && p.cash > 0);
    match (with_cash.next(), with_cash.next()) {
        (Some((idx, _)), None) => Some(idx),
        _ => None,
    }
}

/// Roster index of the first player (quit or not) who has won `times_to_win` rounds.
pub fn threshold_winner(roster: &[Player], times_to_win: u32) -> Option<usize> {
    roster.iter().position(|p| p.wins == times_to_win)
}

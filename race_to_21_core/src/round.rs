//! Deciding when a round is over and who won it.
//!
//! Both functions take the full roster and ignore players who have quit.
//! Ties are broken by roster order: the player who signed up first wins.

use crate::error::GameError;
use crate::state::{Player, PlayerStatus};

/// Whether the round has ended.
///
/// A round ends once somebody hits 21, everybody but one has busted, or
/// nobody is left taking cards.
pub fn round_over(roster: &[Player]) -> bool {
    let in_match: Vec<&Player> = roster.iter().filter(|p| !p.has_quit()).collect();

    if in_match.iter().any(|p| p.status == PlayerStatus::Win) {
        return true;
    }

    let busted = in_match.iter().filter(|p| p.status == PlayerStatus::Bust).count();
    if busted + 1 == in_match.len() {
        return true;
    }

    !in_match.iter().any(|p| p.status == PlayerStatus::Active)
}

/// Roster index of the round winner.
///
/// 1. the first player on exactly 21;
/// 2. else the highest-scoring player who stayed;
/// 3. else the only player who hasn't busted.
///
/// Anything else means the round was closed too early and is reported as
/// [`GameError::NoRoundWinner`].
pub fn round_winner(roster: &[Player]) -> Result<usize, GameError> {
    let in_match = || roster.iter().enumerate().filter(|(_, p)| !p.has_quit());

    if let Some((idx, _)) = in_match().find(|(_, p)| p.status == PlayerStatus::Win) {
        return Ok(idx);
    }

    // Strictly higher score replaces the leader, so the earlier player keeps ties.
    let mut best: Option<(usize, u32)> = None;
    for (idx, player) in in_match().filter(|(_, p)| p.status == PlayerStatus::Stay) {
        if best.is_none_or(|(_, score)| player.score > score) {
            best = Some((idx, player.score));
        }
    }
    if let Some((idx, _)) = best {
        return Ok(idx);
    }

    let mut standing = in_match().filter(|(_, p)| p.status != PlayerStatus::Bust);
    match (standing.next(), standing.next()) {
        (Some((idx, _)), None) => Ok(idx),
        _ => Err(GameError::NoRoundWinner),
    }
}

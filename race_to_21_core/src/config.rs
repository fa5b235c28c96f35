use serde::Deserialize;
use std::ops::RangeInclusive;
use thiserror::Error;

pub const DEFAULT_STARTING_CASH: u32 = 100;
/// Upper bound on the starting stake. Cash grows with every pot, so this
/// leaves plenty of rounds of headroom below `u32::MAX`.
pub const MAX_STARTING_CASH: u32 = 1_000_000;
pub const DEFAULT_MIN_PLAYERS: usize = 2;
pub const DEFAULT_MAX_PLAYERS: usize = 8;
pub const DEFAULT_MIN_WIN_TARGET: u32 = 3;
pub const DEFAULT_MAX_WIN_TARGET: u32 = 6;

/// Largest table a single 52-card deck can serve: even if every player
/// draws until they are on the edge of busting, the deck does not run out.
pub const MAX_SEATS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("starting cash must be positive")]
    NoStartingCash,
    #[error("starting cash {0} is above the limit of {max}", max = MAX_STARTING_CASH)]
    StartingCashTooLarge(u32),
    #[error("a match needs at least 2 players, got a minimum of {0}")]
    TooFewPlayers(usize),
    #[error("at most {max} players fit at a table, got a maximum of {0}", max = MAX_SEATS)]
    TooManyPlayers(usize),
    #[error("player range {min}..={max} is empty")]
    EmptyPlayerRange { min: usize, max: usize },
    #[error("win target range {min}..={max} is empty or starts at zero")]
    InvalidWinTargetRange { min: u32, max: u32 },
}

/// Match configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameSettings {
    pub starting_cash: u32,
    pub min_players: usize,
    pub max_players: usize,
    pub min_win_target: u32,
    pub max_win_target: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            starting_cash: DEFAULT_STARTING_CASH,
            min_players: DEFAULT_MIN_PLAYERS,
            max_players: DEFAULT_MAX_PLAYERS,
            min_win_target: DEFAULT_MIN_WIN_TARGET,
            max_win_target: DEFAULT_MAX_WIN_TARGET,
        }
    }
}

impl GameSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.starting_cash == 0 {
            return Err(SettingsError::NoStartingCash);
        }
        if self.starting_cash > MAX_STARTING_CASH {
            return Err(SettingsError::StartingCashTooLarge(self.starting_cash));
        }
        if self.min_players < 2 {
            return Err(SettingsError::TooFewPlayers(self.min_players));
        }
        if self.max_players > MAX_SEATS {
            return Err(SettingsError::TooManyPlayers(self.max_players));
        }
        if self.min_players > self.max_players {
            return Err(SettingsError::EmptyPlayerRange { min: self.min_players, max: self.max_players });
        }
        if self.min_win_target == 0 || self.min_win_target > self.max_win_target {
            return Err(SettingsError::InvalidWinTargetRange { min: self.min_win_target, max: self.max_win_target });
        }
        Ok(())
    }

    pub fn player_range(&self) -> RangeInclusive<usize> {
        self.min_players..=self.max_players
    }

    pub fn win_target_range(&self) -> RangeInclusive<u32> {
        self.min_win_target..=self.max_win_target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = GameSettings::default();
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.player_range(), 2..=8);
        assert_eq!(settings.win_target_range(), 3..=6);
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let settings = GameSettings { min_players: 1, ..GameSettings::default() };
        assert_eq!(settings.validate(), Err(SettingsError::TooFewPlayers(1)));

        let settings = GameSettings { max_players: 11, ..GameSettings::default() };
        assert_eq!(settings.validate(), Err(SettingsError::TooManyPlayers(11)));

        let settings = GameSettings { min_players: 5, max_players: 4, ..GameSettings::default() };
        assert_eq!(settings.validate(), Err(SettingsError::EmptyPlayerRange { min: 5, max: 4 }));

        let settings = GameSettings { min_win_target: 0, ..GameSettings::default() };
        assert!(matches!(settings.validate(), Err(SettingsError::InvalidWinTargetRange { .. })));

        let settings = GameSettings { starting_cash: 0, ..GameSettings::default() };
        assert_eq!(settings.validate(), Err(SettingsError::NoStartingCash));
    }

    #[test]
    fn test_rejects_oversized_stake() {
        let settings = GameSettings { starting_cash: 3_000_000_000, ..GameSettings::default() };
        assert_eq!(settings.validate(), Err(SettingsError::StartingCashTooLarge(3_000_000_000)));

        let settings = GameSettings { starting_cash: MAX_STARTING_CASH, ..GameSettings::default() };
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings: GameSettings = serde_json::from_str(r#"{ "starting_cash": 250 }"#).unwrap();
        assert_eq!(settings.starting_cash, 250);
        assert_eq!(settings.max_players, DEFAULT_MAX_PLAYERS);
    }
}

use crate::card::Card;
use crate::error::BetError;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Player {
    name: String,
    pub hand: Vec<Card>, // append-only within a round
    pub status: PlayerStatus,
    pub score: u32,
    pub cash: u32,
    pub wins: u32, // rounds won this match
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStatus {
    /// Can still take cards
    Active,
    /// Chose to stop taking cards this round
    Stay,
    /// Went over 21
    Bust,
    /// Hit 21 exactly
    Win,
    /// Left the match for good
    Quit,
}

/// Phases of a match, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    AwaitPlayerCount,
    AwaitWinTarget,
    AwaitPlayerNames,
    IntroducePlayers,
    CollectBets,
    DealFirstCards,
    PlayerTurn,
    CheckRoundEnd,
    AnnounceRoundWinner,
    CheckMatchContinuation,
    Terminal,
}

/// Everything the engine tracks about the match in progress.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Roster in sign-up order. Never reordered.
    pub players: Vec<Player>,
    /// Seating for the current round: a permutation of roster indices.
    pub turn_order: Vec<usize>,
    pub phase: GamePhase,
    pub pot: u32,
    /// Position of the next player to act among the seated (non-quit) players.
    pub cur_player_idx: usize,
    pub player_count: usize,
    pub times_to_win: u32,
}

// --- Player ---

impl Player {
    pub fn new(name: impl Into<String>, cash: u32) -> Self {
        Self {
            name: name.into(),
            hand: Vec::new(),
            status: PlayerStatus::Active,
            score: 0,
            cash,
            wins: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_quit(&self) -> bool {
        self.status == PlayerStatus::Quit
    }

    /// Take `amount` out of the player's cash.
    ///
    /// A bet of zero or one larger than the player's cash is rejected and
    /// leaves the cash untouched.
    pub fn bet(&mut self, amount: u32) -> Result<u32, BetError> {
        if amount == 0 {
            return Err(BetError::NotPositive);
        }
        if amount > self.cash {
            return Err(BetError::InsufficientCash { cash: self.cash });
        }
        self.cash -= amount;
        Ok(amount)
    }

    /// Clear hand, status and score for a new round. Cash and wins carry over.
    pub fn reset_round(&mut self) {
        self.hand.clear();
        self.status = PlayerStatus::Active;
        self.score = 0;
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            PlayerStatus::Active => "ACTIVE",
            PlayerStatus::Stay => "STAY",
            PlayerStatus::Bust => "BUST",
            PlayerStatus::Win => "WIN",
            PlayerStatus::Quit => "QUIT",
        })
    }
}

// --- GameState ---

impl Default for GameState {
    fn default() -> Self {
        Self {
            players: Vec::new(),
            turn_order: Vec::new(),
            phase: GamePhase::AwaitPlayerCount,
            pot: 0,
            cur_player_idx: 0,
            player_count: 0,
            times_to_win: 0,
        }
    }
}

impl GameState {
    pub fn find_player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name() == name)
    }

    /// Append a player to the roster and seat them at the end of the turn order.
    pub fn add_player(&mut self, player: Player) {
        self.turn_order.push(self.players.len());
        self.players.push(player);
    }

    /// Roster indices of the players who haven't quit, in turn order.
    pub fn seated(&self) -> Vec<usize> {
        self.turn_order
            .iter()
            .copied()
            .filter(|&idx| !self.players[idx].has_quit())
            .collect()
    }

    /// Players who haven't quit, in turn order.
    pub fn seated_players(&self) -> Vec<&Player> {
        self.seated().into_iter().map(|idx| &self.players[idx]).collect()
    }

    /// Players who haven't quit, in roster order.
    pub fn players_in_match(&self) -> Vec<&Player> {
        self.players.iter().filter(|p| !p.has_quit()).collect()
    }

    /// Roster index of the player whose turn it is, if anyone is seated.
    pub fn current_player(&self) -> Option<usize> {
        let seated = self.seated();
        seated.get(self.cur_player_idx % seated.len().max(1)).copied()
    }

    /// Take a bet from the player at roster index `idx` and add twice the
    /// amount to the pot. Returns the amount taken.
    ///
    /// A bet that would overflow the pot is rejected before any cash moves.
    pub fn place_bet(&mut self, idx: usize, amount: u32) -> Result<u32, BetError> {
        let pot = amount
            .checked_mul(2)
            .and_then(|stake| self.pot.checked_add(stake))
            .ok_or(BetError::PotOverflow)?;
        let bet = self.players[idx].bet(amount)?;
        self.pot = pot;
        Ok(bet)
    }

    /// Move the turn to the next seated player, wrapping around.
    pub fn advance_turn(&mut self) {
        let seated_count = self.seated().len();
        self.cur_player_idx = if seated_count == 0 { 0 } else { (self.cur_player_idx + 1) % seated_count };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_of(names: &[&str]) -> GameState {
        let mut state = GameState::default();
        for name in names {
            state.add_player(Player::new(*name, 100));
        }
        state
    }

    #[test]
    fn test_bet_within_cash() {
        let mut player = Player::new("X", 50);
        assert_eq!(player.bet(60), Err(BetError::InsufficientCash { cash: 50 }));
        assert_eq!(player.cash, 50);

        assert_eq!(player.bet(30), Ok(30));
        assert_eq!(player.cash, 20);

        assert_eq!(player.bet(0), Err(BetError::NotPositive));
        assert_eq!(player.cash, 20);

        assert_eq!(player.bet(20), Ok(20));
        assert_eq!(player.cash, 0);
    }

    #[test]
    fn test_place_bet_doubles_into_pot() {
        let mut state = table_of(&["A", "B"]);
        state.players[0].cash = 50;
        assert_eq!(state.place_bet(0, 60), Err(BetError::InsufficientCash { cash: 50 }));
        assert_eq!(state.pot, 0);

        assert_eq!(state.place_bet(0, 30), Ok(30));
        assert_eq!(state.players[0].cash, 20);
        assert_eq!(state.pot, 60);
    }

    #[test]
    fn test_place_bet_rejects_pot_overflow() {
        let mut state = table_of(&["A", "B"]);
        state.players[0].cash = u32::MAX;
        assert_eq!(state.place_bet(0, 3_000_000_000), Err(BetError::PotOverflow));
        assert_eq!(state.players[0].cash, u32::MAX);
        assert_eq!(state.pot, 0);

        state.pot = u32::MAX - 10;
        assert_eq!(state.place_bet(0, 6), Err(BetError::PotOverflow));
        assert_eq!(state.place_bet(0, 5), Ok(5));
        assert_eq!(state.pot, u32::MAX);
    }

    #[test]
    fn test_reset_round_keeps_cash_and_wins() {
        let mut player = Player::new("X", 100);
        player.hand.push("KS".parse().unwrap());
        player.status = PlayerStatus::Bust;
        player.score = 25;
        player.cash = 70;
        player.wins = 2;

        player.reset_round();
        assert!(player.hand.is_empty());
        assert_eq!(player.status, PlayerStatus::Active);
        assert_eq!(player.score, 0);
        assert_eq!(player.cash, 70);
        assert_eq!(player.wins, 2);
    }

    #[test]
    fn test_seated_skips_quit_players() {
        let mut state = table_of(&["A", "B", "C"]);
        state.turn_order = vec![2, 0, 1];
        state.players[0].status = PlayerStatus::Quit;

        assert_eq!(state.seated(), vec![2, 1]);
        let names: Vec<_> = state.players_in_match().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_turn_advances_and_wraps_over_seated_players() {
        let mut state = table_of(&["A", "B", "C"]);
        state.players[1].status = PlayerStatus::Quit;

        assert_eq!(state.current_player(), Some(0));
        state.advance_turn();
        assert_eq!(state.current_player(), Some(2));
        state.advance_turn();
        assert_eq!(state.current_player(), Some(0));
    }

    #[test]
    fn test_current_player_with_nobody_seated() {
        let mut state = table_of(&["A"]);
        state.players[0].status = PlayerStatus::Quit;
        assert_eq!(state.current_player(), None);
        state.advance_turn();
        assert_eq!(state.cur_player_idx, 0);
    }

    #[test]
    fn test_find_player_is_case_sensitive() {
        let state = table_of(&["Ann"]);
        assert!(state.find_player("Ann").is_some());
        assert!(state.find_player("ann").is_none());
    }
}

use crate::config::{GameSettings, SettingsError};
use crate::deck::Deck;
use crate::error::GameError;
use crate::rng::GameRng;
use crate::round::{round_over, round_winner};
use crate::scoring::{TARGET_SCORE, score_hand};
#[cfg(any(test, feature = "score-override"))]
use crate::scoring::ScoreOverride;
use crate::state::*;
use crate::table::Table;
use crate::tournament::{MatchEndReason, forced_winner, standings, threshold_winner};
use tracing::{debug, info, warn};

const DIVIDER: &str = "================================";

/// The match state machine.
///
/// Call [`GameEngine::step`] until it returns [`GamePhase::Terminal`]. Each
/// step runs one phase to completion, blocking on the table for any
/// decisions it needs.
pub struct GameEngine<T: Table, D: Deck> {
    state: GameState,
    settings: GameSettings,
    table: T,
    deck: D,
    rng: GameRng,
    #[cfg(any(test, feature = "score-override"))]
    score_override: Option<Box<dyn ScoreOverride>>,
}

impl<T: Table, D: Deck> GameEngine<T, D> {
    /// Set up a match. The deck is shuffled right away for the first round.
    pub fn new(table: T, mut deck: D, settings: GameSettings, mut rng: GameRng) -> Result<Self, SettingsError> {
        settings.validate()?;
        deck.shuffle(&mut rng);
        Ok(Self {
            state: GameState::default(),
            settings,
            table,
            deck,
            rng,
            #[cfg(any(test, feature = "score-override"))]
            score_override: None,
        })
    }

    /// Replace computed scores of active players with hand-entered ones.
    #[cfg(any(test, feature = "score-override"))]
    pub fn with_score_override(mut self, score_override: impl ScoreOverride + 'static) -> Self {
        self.score_override = Some(Box::new(score_override));
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut T {
        &mut self.table
    }

    pub fn into_table(self) -> T {
        self.table
    }

    pub fn is_over(&self) -> bool {
        self.state.phase == GamePhase::Terminal
    }

    /// Run the current phase and move on. Returns the phase the match is now in.
    pub fn step(&mut self) -> Result<GamePhase, GameError> {
        let phase = self.state.phase;
        if phase == GamePhase::Terminal {
            return Err(GameError::MatchOver);
        }
        self.table.write_message(DIVIDER)?;

        let next = match phase {
            GamePhase::AwaitPlayerCount => self.ask_player_count()?,
            GamePhase::AwaitWinTarget => self.ask_win_target()?,
            GamePhase::AwaitPlayerNames => self.ask_player_names()?,
            GamePhase::IntroducePlayers => self.introduce_players()?,
            GamePhase::CollectBets => self.collect_bets()?,
            GamePhase::DealFirstCards => self.deal_first_cards()?,
            GamePhase::PlayerTurn => self.player_turn()?,
            GamePhase::CheckRoundEnd => self.check_round_end()?,
            GamePhase::AnnounceRoundWinner => self.announce_round_winner()?,
            GamePhase::CheckMatchContinuation => self.check_match_continuation()?,
            GamePhase::Terminal => return Err(GameError::MatchOver),
        };

        debug!(from = ?phase, to = ?next, "phase transition");
        self.state.phase = next;
        Ok(next)
    }

    /// Step until the match is over.
    pub fn run(&mut self) -> Result<(), GameError> {
        while !self.is_over() {
            self.step()?;
        }
        Ok(())
    }

    // --- Setup ---

    fn ask_player_count(&mut self) -> Result<GamePhase, GameError> {
        let count = self.table.ask_player_count(self.settings.player_range())?;
        self.state.player_count = count;
        debug!(count, "player count set");
        Ok(GamePhase::AwaitWinTarget)
    }

    fn ask_win_target(&mut self) -> Result<GamePhase, GameError> {
        let target = self.table.ask_win_target(self.settings.win_target_range())?;
        self.state.times_to_win = target;
        debug!(target, "win target set");
        Ok(GamePhase::AwaitPlayerNames)
    }

    fn ask_player_names(&mut self) -> Result<GamePhase, GameError> {
        while self.state.players.len() < self.state.player_count {
            let slot = self.state.players.len() + 1;
            let name = self.table.ask_player_name(slot)?;
            if name.is_empty() {
                self.table.write_message("Invalid name.")?;
                continue;
            }
            // Same slot is asked again until the name is unique.
            if self.state.find_player(&name).is_some() {
                self.table.write_message("The name is used.")?;
                continue;
            }
            debug!(slot, name = %name, "player joined");
            self.state.add_player(Player::new(name, self.settings.starting_cash));
        }
        Ok(GamePhase::IntroducePlayers)
    }

    // --- Round ---

    fn introduce_players(&mut self) -> Result<GamePhase, GameError> {
        for (position, idx) in self.state.seated().into_iter().enumerate() {
            self.table.introduce(&self.state.players[idx], position + 1)?;
        }
        Ok(GamePhase::CollectBets)
    }

    fn collect_bets(&mut self) -> Result<GamePhase, GameError> {
        self.state.pot = 0;
        for idx in self.state.seated() {
            loop {
                let amount = self.table.ask_bet(&self.state.players[idx])?;
                match self.state.place_bet(idx, amount) {
                    Ok(bet) => {
                        debug!(player = self.state.players[idx].name(), bet, pot = self.state.pot, "bet placed");
                        break;
                    }
                    Err(err) => {
                        warn!(player = self.state.players[idx].name(), amount, %err, "bet rejected");
                        self.table.write_message(&err.to_string())?;
                    }
                }
            }
        }
        Ok(GamePhase::DealFirstCards)
    }

    fn deal_first_cards(&mut self) -> Result<GamePhase, GameError> {
        self.table.write_message("Giving the players their first card...")?;
        for idx in self.state.seated() {
            self.deal_to(idx)?;
        }
        Ok(GamePhase::PlayerTurn)
    }

    fn player_turn(&mut self) -> Result<GamePhase, GameError> {
        let idx = self.state.current_player().ok_or(GameError::EmptyTurnOrder)?;

        if self.state.players[idx].status == PlayerStatus::Active {
            self.table.show_hands(&self.state.seated_players())?;

            if self.table.ask_wants_card(&self.state.players[idx])? {
                self.deal_to(idx)?;
                let player = &mut self.state.players[idx];
                if player.score > TARGET_SCORE {
                    player.status = PlayerStatus::Bust;
                } else if player.score == TARGET_SCORE {
                    player.status = PlayerStatus::Win;
                }
                debug!(player = player.name(), score = player.score, status = %player.status, "card taken");
                self.table.show_hand(&self.state.players[idx])?;
            } else {
                let player = &mut self.state.players[idx];
                player.status = PlayerStatus::Stay;
                debug!(player = player.name(), score = player.score, "player stays");
                let message = format!("{} decides to stay...", player.name());
                self.table.write_message(&message)?;
            }
        } else {
            let player = &self.state.players[idx];
            let message = format!("Skipping {}'s turn ({})...", player.name(), player.status);
            self.table.write_message(&message)?;
        }

        self.state.advance_turn();
        Ok(GamePhase::CheckRoundEnd)
    }

    fn check_round_end(&mut self) -> Result<GamePhase, GameError> {
        if round_over(&self.state.players) {
            return Ok(GamePhase::AnnounceRoundWinner);
        }
        self.table.write_message("Next player...")?;
        Ok(GamePhase::PlayerTurn)
    }

    fn announce_round_winner(&mut self) -> Result<GamePhase, GameError> {
        self.table.show_hands(&self.state.players_in_match())?;

        let idx = round_winner(&self.state.players)?;
        let amount = self.state.pot;
        let winner = &mut self.state.players[idx];
        let Some(cash) = winner.cash.checked_add(amount) else {
            return Err(GameError::CashOverflow { player: winner.name().to_string(), amount });
        };
        winner.cash = cash;
        winner.wins += 1;
        self.state.pot = 0;
        info!(winner = winner.name(), amount, wins = winner.wins, "round won");

        self.table.announce_round_winner(&self.state.players[idx], amount)?;
        Ok(GamePhase::CheckMatchContinuation)
    }

    // --- Match ---

    fn check_match_continuation(&mut self) -> Result<GamePhase, GameError> {
        if let Some(idx) = forced_winner(&self.state.players) {
            return self.finish(MatchEndReason::InsufficientCash, Some(idx));
        }
        if let Some(idx) = threshold_winner(&self.state.players, self.state.times_to_win) {
            return self.finish(MatchEndReason::WinTarget, Some(idx));
        }

        for idx in self.state.seated() {
            let player = &self.state.players[idx];
            let keeps_playing = if player.cash == 0 {
                let message = format!("{}, you don't have enough cash for the next game.", player.name());
                self.table.write_message(&message)?;
                false
            } else {
                self.table.ask_continue(player)?
            };
            if !keeps_playing {
                let player = &mut self.state.players[idx];
                player.status = PlayerStatus::Quit;
                info!(player = player.name(), cash = player.cash, "player left the match");
            }
        }

        let seated = self.state.seated();
        for &idx in &seated {
            self.state.players[idx].reset_round();
        }
        if seated.len() <= 1 {
            return self.finish(MatchEndReason::InsufficientPlayers, None);
        }

        self.table.write_message("Rearranging players order...")?;
        self.rng.shuffle(&mut self.state.turn_order);
        self.state.cur_player_idx = 0;
        self.deck.rebuild();
        self.deck.shuffle(&mut self.rng);
        debug!(turn_order = ?self.state.turn_order, "new round");
        Ok(GamePhase::IntroducePlayers)
    }

    fn finish(&mut self, reason: MatchEndReason, distinguished: Option<usize>) -> Result<GamePhase, GameError> {
        let players = &self.state.players;
        let ranked = standings(players);
        let distinguished = distinguished.map(|idx| &players[idx]);
        if let Some(champion) = ranked.first() {
            info!(reason = ?reason, code = reason.code(), champion = champion.name(), cash = champion.cash, "match over");
        }
        self.table.announce_match_end(&ranked, reason, distinguished)?;
        Ok(GamePhase::Terminal)
    }

    // --- Helpers ---

    fn deal_to(&mut self, idx: usize) -> Result<(), GameError> {
        let card = self.deck.deal_top()?;
        self.state.players[idx].hand.push(card);
        let score = match self.manual_score(idx) {
            Some(score) => score,
            None => score_hand(&self.state.players[idx].hand),
        };
        self.state.players[idx].score = score;
        debug!(
            player = self.state.players[idx].name(),
            card = %card.id(),
            remaining = self.deck.remaining(),
            "card dealt"
        );
        Ok(())
    }

    #[cfg(any(test, feature = "score-override"))]
    fn manual_score(&mut self, idx: usize) -> Option<u32> {
        let player = &self.state.players[idx];
        if player.status != PlayerStatus::Active {
            return None;
        }
        self.score_override.as_mut()?.score_for(player)
    }

    #[cfg(not(any(test, feature = "score-override")))]
    fn manual_score(&mut self, _idx: usize) -> Option<u32> {
        None
    }
}

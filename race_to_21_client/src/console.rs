//! Terminal front end: prompts on the output stream, answers from the input stream.

use crossterm::style::Stylize;
use race_to_21_core::{MatchEndReason, Player, PlayerStatus, TARGET_SCORE, Table, TableError};
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::ops::RangeInclusive;

/// A [`Table`] played by people sharing one terminal.
///
/// Malformed answers are re-asked here and never reach the engine.
pub struct ConsoleTable<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsoleTable<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn prompt(&mut self, text: impl Display) -> Result<String, TableError> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(TableError::InputClosed);
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, text: impl Display) -> Result<(), TableError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    fn ask_in_range<N>(&mut self, question: &str, range: RangeInclusive<N>, complaint: &str) -> Result<N, TableError>
    where
        N: std::str::FromStr + PartialOrd + Display + Copy,
    {
        let text = format!("{question} ({}-{}) ", range.start(), range.end());
        loop {
            match self.prompt(&text)?.parse::<N>() {
                Ok(n) if range.contains(&n) => return Ok(n),
                _ => self.say(complaint)?,
            }
        }
    }

    fn ask_yes_no(&mut self, question: &str) -> Result<bool, TableError> {
        loop {
            let answer = self.prompt(question)?.to_ascii_lowercase();
            match answer.chars().next() {
                Some('y') => return Ok(true),
                Some('n') => return Ok(false),
                _ => self.say("Please answer Y(es) or N(o)!")?,
            }
        }
    }
}

fn hand_line(player: &Player) -> String {
    let cards: Vec<String> = player.hand.iter().map(|c| c.display_name()).collect();
    let mut line = format!("{} has: {} = {}/{}", player.name(), cards.join(", "), player.score, TARGET_SCORE);
    if player.status != PlayerStatus::Active {
        line.push_str(&format!(" ({})", player.status));
    }
    line
}

impl<R: BufRead, W: Write> Table for ConsoleTable<R, W> {
    fn ask_player_count(&mut self, range: RangeInclusive<usize>) -> Result<usize, TableError> {
        self.ask_in_range("How many players?", range, "Invalid number of players.")
    }

    fn ask_win_target(&mut self, range: RangeInclusive<u32>) -> Result<u32, TableError> {
        self.ask_in_range("How many round wins take the match?", range, "Invalid number of wins.")
    }

    fn ask_player_name(&mut self, slot: usize) -> Result<String, TableError> {
        loop {
            let name = self.prompt(format!("What is the name of player# {slot}? "))?;
            if !name.is_empty() {
                return Ok(name);
            }
            self.say("Invalid name.")?;
        }
    }

    fn introduce(&mut self, player: &Player, position: usize) -> Result<(), TableError> {
        self.say(format!(
            "Hello, my name is {} and I am player #{} (Cash: ${}, Wins: {})",
            player.name(),
            position,
            player.cash,
            player.wins
        ))
    }

    fn ask_bet(&mut self, player: &Player) -> Result<u32, TableError> {
        let question = format!("{}, how much do you want to bet? ", player.name());
        loop {
            match self.prompt(&question)?.parse::<i64>() {
                // Zero and negative amounts go to the engine, which rejects them.
                Ok(amount) if amount <= 0 => return Ok(0),
                Ok(amount) => return Ok(u32::try_from(amount).unwrap_or(u32::MAX)),
                Err(_) => self.say("Please enter a valid number.")?,
            }
        }
    }

    fn ask_wants_card(&mut self, player: &Player) -> Result<bool, TableError> {
        self.ask_yes_no(&format!("{}, do you want a card? (Y/N) ", player.name()))
    }

    fn ask_continue(&mut self, player: &Player) -> Result<bool, TableError> {
        self.ask_yes_no(&format!(
            "{}, do you want to keep playing (cash: {}$)? (Y/N) ",
            player.name(),
            player.cash
        ))
    }

    fn show_hand(&mut self, player: &Player) -> Result<(), TableError> {
        if player.hand.is_empty() {
            return Ok(());
        }
        self.say(hand_line(player))
    }

    fn announce_round_winner(&mut self, player: &Player, amount: u32) -> Result<(), TableError> {
        if amount > 0 {
            self.say(format!("{} wins {}$!", player.name(), amount).green())?;
        } else {
            self.say(format!("{} wins!", player.name()).green())?;
        }
        self.prompt("Press <Enter> to continue... ")?;
        Ok(())
    }

    fn announce_match_end(
        &mut self,
        standings: &[&Player],
        reason: MatchEndReason,
        distinguished: Option<&Player>,
    ) -> Result<(), TableError> {
        match distinguished {
            Some(player) => self.say(format!("{} {}!", player.name(), reason))?,
            None => self.say(format!("Game over: {reason}."))?,
        }

        self.say("Final standings:")?;
        for (rank, player) in standings.iter().enumerate() {
            let row = format!(
                "{:>2}. {:<12} cash: {:>5}$  wins: {}",
                rank + 1,
                player.name(),
                player.cash,
                player.wins
            );
            if rank == 0 {
                self.say(row.bold().yellow())?;
            } else {
                self.say(row)?;
            }
        }

        if let Some(champion) = standings.first() {
            self.say(format!("{} wins the match with {}$!", champion.name(), champion.cash))?;
        }
        self.output.flush()?;
        Ok(())
    }

    fn write_message(&mut self, message: &str) -> Result<(), TableError> {
        self.say(message)
    }
}

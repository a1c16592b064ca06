use crate::GameError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Rock, Choice::Paper, Choice::Scissors];

    /// Whether this move defeats `other`.
    pub fn beats(self, other: Choice) -> bool {
        matches!(
            (self, other),
            (Choice::Rock, Choice::Scissors)
                | (Choice::Paper, Choice::Rock)
                | (Choice::Scissors, Choice::Paper)
        )
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Choice::Rock => "🪨",
            Choice::Paper => "📄",
            Choice::Scissors => "✂️",
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Choice::Rock => "Rock",
            Choice::Paper => "Paper",
            Choice::Scissors => "Scissors",
        };
        f.write_str(name)
    }
}

impl FromStr for Choice {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rock" | "r" => Ok(Choice::Rock),
            "paper" | "p" => Ok(Choice::Paper),
            "scissors" | "s" => Ok(Choice::Scissors),
            _ => Err(GameError::InvalidChoice(s.to_string())),
        }
    }
}

/// Result of a round from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
    Tie,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Outcome::Win => "Win",
            Outcome::Lose => "Lose",
            Outcome::Tie => "Tie",
        };
        f.write_str(name)
    }
}

/// One completed play. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    player_choice: Choice,
    computer_choice: Choice,
    outcome: Outcome,
    played_at: DateTime<Utc>,
}

impl Round {
    pub(crate) fn new(player_choice: Choice, computer_choice: Choice, outcome: Outcome) -> Self {
        Self {
            player_choice,
            computer_choice,
            outcome,
            played_at: Utc::now(),
        }
    }

    pub fn player_choice(&self) -> Choice {
        self.player_choice
    }

    pub fn computer_choice(&self) -> Choice {
        self.computer_choice
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn played_at(&self) -> DateTime<Utc> {
        self.played_at
    }

    pub fn is_win(&self) -> bool {
        self.outcome == Outcome::Win
    }
}

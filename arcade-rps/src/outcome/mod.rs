//! Outcome engine: the fixed rule table and the house's random move.

pub mod choice;

pub use choice::{Choice, Outcome, Round};

use crate::{GameError, Result};
use rand::RngCore;

// A byte is redrawn when it falls at or above this bound, 255 = 3 * 85.
const UNIFORM_BOUND: u8 = 255;
const MAX_DRAW_ATTEMPTS: usize = 64;

/// Compare two moves from the player's side.
pub fn determine_outcome(player: Choice, computer: Choice) -> Outcome {
    if player == computer {
        Outcome::Tie
    } else if player.beats(computer) {
        Outcome::Win
    } else {
        Outcome::Lose
    }
}

/// Draw the computer's move uniformly from the three choices.
///
/// A failing source is reported as [`GameError::Randomness`] instead of
/// falling back to a fixed move.
pub fn draw_computer_choice<R: RngCore + ?Sized>(rng: &mut R) -> Result<Choice> {
    for _ in 0..MAX_DRAW_ATTEMPTS {
        let mut byte = [0u8; 1];
        rng.try_fill_bytes(&mut byte)
            .map_err(|e| GameError::Randomness(e.to_string()))?;

        if byte[0] < UNIFORM_BOUND {
            return Ok(Choice::ALL[(byte[0] % 3) as usize]);
        }
    }

    Err(GameError::Randomness(format!(
        "no usable value after {} draws",
        MAX_DRAW_ATTEMPTS
    )))
}

pub fn play_round<R: RngCore + ?Sized>(player: Choice, rng: &mut R) -> Result<Round> {
    let computer = draw_computer_choice(rng)?;
    Ok(Round::new(player, computer, determine_outcome(player, computer)))
}

//! Rock-paper-scissors against the house with a token prize
//!
//! The player picks a move, the house draws one uniformly at random and the
//! fixed rule table decides the round. A win unlocks a one-off prize claim
//! that is paid through the collaborators in `arcade_core::wallet`.

pub mod error;
pub mod game;
pub mod outcome;
pub mod session;

pub use error::{GameError, Result};
pub use game::RpsGame;
pub use outcome::{determine_outcome, draw_computer_choice, play_round, Choice, Outcome, Round};
pub use session::{GameSession, SessionPhase, SessionSnapshot};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Arcade core error: {0}")]
    Arcade(#[from] arcade_core::ArcadeError),

    #[error("No account connected")]
    NotConnected,

    #[error("Prize claim unavailable: {0}")]
    ClaimUnavailable(String),

    #[error("Invalid game state: {0}")]
    InvalidState(String),

    #[error("Invalid choice: {0}")]
    InvalidChoice(String),

    #[error("Random source failed: {0}")]
    Randomness(String),
}

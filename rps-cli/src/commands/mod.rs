pub mod account;
pub mod balance;
pub mod config;
pub mod play;

pub use account::{handle_account_command, AccountCommands};
pub use balance::show_balance;
pub use config::{handle_config_command, ConfigCommands};
pub use play::{play_interactive, play_single_round};

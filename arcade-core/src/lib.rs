//! Arcade core - accounts, prize token ledger and collaborator traits
//!
//! The game crates talk to wallets only through the traits in [`wallet`];
//! [`AccountManager`] and [`TokenLedger`] are the local implementations.

pub mod error;
pub mod ledger;
pub mod storage;
pub mod types;
pub mod wallet;

pub use error::{ArcadeError, Result};
pub use ledger::TokenLedger;
pub use types::{Address, ClaimReceipt, TokenAmount, TokenBalance};
pub use wallet::{
    Account, AccountManager, AccountProvider, ArcadeConfig, BalanceReader, ClaimPolicy,
    ClaimSubmitter, TokenContract,
};

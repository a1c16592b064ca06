pub mod config;
pub mod instance;
pub mod manager;

pub use config::{ArcadeConfig, ChainConfig, ClaimPolicy, NativeCurrency, PrizeConfig, TokenContract};
pub use instance::Account;
pub use manager::AccountManager;

use crate::error::Result;
use crate::types::{Address, ClaimReceipt, TokenAmount, TokenBalance};
use async_trait::async_trait;

/// Supplies the currently connected account, if any.
pub trait AccountProvider: Send + Sync {
    fn current_address(&self) -> Option<Address>;

    /// Ends the account session. Idempotent.
    fn disconnect(&self);
}

/// Read-only token balance lookup.
#[async_trait]
pub trait BalanceReader: Send + Sync {
    async fn balance_of(&self, account: &Address, contract: &TokenContract)
        -> Result<TokenBalance>;
}

/// Submits the prize transfer for a winning account.
///
/// Implementations must not report success unless the transfer is final.
#[async_trait]
pub trait ClaimSubmitter: Send + Sync {
    async fn claim_to(
        &self,
        account: &Address,
        contract: &TokenContract,
        amount: TokenAmount,
    ) -> Result<ClaimReceipt>;
}

pub fn generate_address() -> Address {
    let mut bytes = [0u8; 20];
    rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut bytes);
    Address::from_bytes(&bytes)
}

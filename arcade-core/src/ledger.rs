//! Local token ledger standing in for the prize token contract.

use crate::error::{ArcadeError, Result};
use crate::storage::{LedgerStore, Storage};
use crate::types::{Address, ClaimReceipt, TokenAmount, TokenBalance};
use crate::wallet::{BalanceReader, ClaimSubmitter, TokenContract};
use async_trait::async_trait;
use chrono::Utc;
use rand::RngCore;
use std::path::Path;

pub struct TokenLedger {
    chain_id: u64,
    storage: Storage,
}

impl TokenLedger {
    pub async fn open(path: &Path, chain_id: u64) -> Result<Self> {
        Ok(Self {
            chain_id,
            storage: Storage::new(path).await?,
        })
    }

    pub fn in_memory(chain_id: u64) -> Self {
        Self {
            chain_id,
            storage: Storage::in_memory(),
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn check_chain(&self, contract: &TokenContract) -> Result<()> {
        if contract.chain_id != self.chain_id {
            return Err(ArcadeError::claim(format!(
                "Contract {} is on chain {}, ledger serves chain {}",
                contract.address, contract.chain_id, self.chain_id
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl BalanceReader for TokenLedger {
    async fn balance_of(
        &self,
        account: &Address,
        contract: &TokenContract,
    ) -> Result<TokenBalance> {
        self.check_chain(contract)?;

        let amount = LedgerStore::new(&self.storage)
            .balance(&contract.address, account)
            .await?;

        Ok(TokenBalance::new(amount, contract.decimals, &contract.symbol))
    }
}

#[async_trait]
impl ClaimSubmitter for TokenLedger {
    async fn claim_to(
        &self,
        account: &Address,
        contract: &TokenContract,
        amount: TokenAmount,
    ) -> Result<ClaimReceipt> {
        self.check_chain(contract)?;

        if amount.is_zero() {
            return Err(ArcadeError::claim("Claim amount must be greater than 0"));
        }

        let new_balance = LedgerStore::new(&self.storage)
            .credit(&contract.address, account, amount)
            .await?;

        let receipt = ClaimReceipt {
            tx_hash: generate_tx_hash(),
            account: account.clone(),
            contract: contract.address.clone(),
            amount,
            timestamp: Utc::now(),
        };

        tracing::info!(
            "Minted {} {} to {} (balance {}), tx {}",
            amount.display(contract.decimals),
            contract.symbol,
            account,
            new_balance.display(contract.decimals),
            receipt.tx_hash
        );

        Ok(receipt)
    }
}

fn generate_tx_hash() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}

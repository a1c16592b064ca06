use crate::error::{ArcadeError, Result};
use crate::storage::Storage;
use crate::types::{Address, TokenAmount};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Default, Serialize, Deserialize)]
struct LedgerFile {
    // contract -> account -> balance
    balances: BTreeMap<Address, BTreeMap<Address, TokenAmount>>,
}

pub struct LedgerStore<'a> {
    storage: &'a Storage,
}

impl<'a> LedgerStore<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub async fn balance(&self, contract: &Address, account: &Address) -> Result<TokenAmount> {
        let file: LedgerFile = self.storage.read().await?;
        Ok(file
            .balances
            .get(contract)
            .and_then(|accounts| accounts.get(account))
            .copied()
            .unwrap_or(TokenAmount::ZERO))
    }

    /// Adds `amount` to the account's balance and returns the new balance.
    pub async fn credit(
        &self,
        contract: &Address,
        account: &Address,
        amount: TokenAmount,
    ) -> Result<TokenAmount> {
        self.storage
            .update(|file: &mut LedgerFile| {
                let balance = file
                    .balances
                    .entry(contract.clone())
                    .or_default()
                    .entry(account.clone())
                    .or_default();

                *balance = balance.checked_add(amount).ok_or_else(|| {
                    ArcadeError::claim(format!("Balance overflow for {}", account))
                })?;
                Ok(*balance)
            })
            .await
    }
}

use crate::error::{ArcadeError, Result};
use crate::storage::Storage;
use crate::types::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountData {
    pub id: String,
    pub name: String,
    pub address: Address,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct AccountsFile {
    accounts: BTreeMap<String, AccountData>,
}

pub struct AccountStore<'a> {
    storage: &'a Storage,
}

impl<'a> AccountStore<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Inserts a new account, failing if the name is taken.
    pub async fn insert_account(&self, account: &AccountData) -> Result<()> {
        self.storage
            .update(|file: &mut AccountsFile| {
                if file.accounts.contains_key(&account.name) {
                    return Err(ArcadeError::AccountExists {
                        name: account.name.clone(),
                    });
                }
                file.accounts.insert(account.name.clone(), account.clone());
                Ok(())
            })
            .await
    }

    pub async fn load_account(&self, name: &str) -> Result<AccountData> {
        let file: AccountsFile = self.storage.read().await?;
        file.accounts
            .get(name)
            .cloned()
            .ok_or_else(|| ArcadeError::AccountNotFound {
                name: name.to_string(),
            })
    }

    pub async fn list_accounts(&self) -> Result<Vec<AccountData>> {
        let file: AccountsFile = self.storage.read().await?;
        Ok(file.accounts.into_values().collect())
    }
}

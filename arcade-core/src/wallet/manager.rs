use crate::error::{ArcadeError, Result};
use crate::storage::account_store::AccountData;
use crate::storage::{AccountStore, Storage};
use crate::types::Address;
use crate::wallet::{generate_address, Account, AccountProvider};
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Local accounts plus the one currently connected.
pub struct AccountManager {
    storage: Arc<Storage>,
    accounts: Arc<RwLock<HashMap<String, Account>>>,
    active: RwLock<Option<Account>>,
}

impl AccountManager {
    pub async fn new(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join("accounts.json");
        let storage = Arc::new(Storage::new(&path).await?);
        Ok(Self::with_storage(storage))
    }

    pub fn in_memory() -> Self {
        Self::with_storage(Arc::new(Storage::in_memory()))
    }

    fn with_storage(storage: Arc<Storage>) -> Self {
        Self {
            storage,
            accounts: Arc::new(RwLock::new(HashMap::new())),
            active: RwLock::new(None),
        }
    }

    pub async fn create_account(&self, name: &str) -> Result<Account> {
        if name.trim().is_empty() {
            return Err(ArcadeError::account("Account name cannot be empty"));
        }

        let account_data = AccountData {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            address: generate_address(),
            created_at: Utc::now(),
        };

        AccountStore::new(&self.storage)
            .insert_account(&account_data)
            .await?;

        let account = to_account(account_data);
        {
            let mut accounts = self.accounts.write();
            accounts.insert(account.name().to_string(), account.clone());
        }

        tracing::info!(
            "Created account '{}' with address {}",
            name,
            account.address()
        );
        Ok(account)
    }

    pub async fn load_account(&self, name: &str) -> Result<Account> {
        {
            let accounts = self.accounts.read();
            if let Some(account) = accounts.get(name) {
                return Ok(account.clone());
            }
        }

        let account_data = AccountStore::new(&self.storage).load_account(name).await?;
        let account = to_account(account_data);

        {
            let mut accounts = self.accounts.write();
            accounts.insert(name.to_string(), account.clone());
        }

        Ok(account)
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let accounts = AccountStore::new(&self.storage).list_accounts().await?;
        Ok(accounts.into_iter().map(to_account).collect())
    }

    /// Connects `name`, creating the account on first use.
    pub async fn connect(&self, name: &str) -> Result<Account> {
        let account = match self.load_account(name).await {
            Ok(account) => account,
            Err(ArcadeError::AccountNotFound { .. }) => match self.create_account(name).await {
                Ok(account) => account,
                // a concurrent connect created it first
                Err(ArcadeError::AccountExists { .. }) => self.load_account(name).await?,
                Err(e) => return Err(e),
            },
            Err(e) => return Err(e),
        };

        *self.active.write() = Some(account.clone());
        tracing::info!("Connected account '{}' ({})", name, account.address().shorten());
        Ok(account)
    }

    pub fn active_account(&self) -> Option<Account> {
        self.active.read().clone()
    }
}

impl AccountProvider for AccountManager {
    fn current_address(&self) -> Option<Address> {
        self.active.read().as_ref().map(|a| a.address().clone())
    }

    fn disconnect(&self) {
        if let Some(account) = self.active.write().take() {
            tracing::info!("Disconnected account '{}'", account.name());
        }
    }
}

fn to_account(data: AccountData) -> Account {
    Account::new(data.id, data.name, data.address, data.created_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_create_and_load_account() {
        let dir = tempdir().unwrap();
        let manager = AccountManager::new(dir.path()).await.unwrap();

        let created = manager.create_account("alice").await.unwrap();
        assert_eq!(created.name(), "alice");

        let reopened = AccountManager::new(dir.path()).await.unwrap();
        let loaded = reopened.load_account("alice").await.unwrap();
        assert_eq!(loaded, created);
    }

    #[tokio::test]
    async fn test_duplicate_and_missing_accounts() {
        let manager = AccountManager::in_memory();
        manager.create_account("alice").await.unwrap();

        assert!(matches!(
            manager.create_account("alice").await,
            Err(ArcadeError::AccountExists { .. })
        ));
        assert!(matches!(
            manager.load_account("bob").await,
            Err(ArcadeError::AccountNotFound { .. })
        ));
        assert!(manager.create_account("  ").await.is_err());
    }

    #[tokio::test]
    async fn test_list_accounts_sorted_by_name() {
        let manager = AccountManager::in_memory();
        manager.create_account("carol").await.unwrap();
        manager.create_account("alice").await.unwrap();

        let names: Vec<String> = manager
            .list_accounts()
            .await
            .unwrap()
            .iter()
            .map(|a| a.name().to_string())
            .collect();
        assert_eq!(names, vec!["alice", "carol"]);
    }

    #[tokio::test]
    async fn test_connect_and_disconnect() {
        let manager = AccountManager::in_memory();
        assert!(manager.current_address().is_none());

        let account = manager.connect("alice").await.unwrap();
        assert_eq!(manager.current_address(), Some(account.address().clone()));

        // reconnecting reuses the stored account
        manager.disconnect();
        assert!(manager.current_address().is_none());
        let again = manager.connect("alice").await.unwrap();
        assert_eq!(again.address(), account.address());

        manager.disconnect();
        manager.disconnect();
        assert!(manager.active_account().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_first_connect_shares_account() {
        let dir = tempdir().unwrap();
        let manager = Arc::new(AccountManager::new(dir.path()).await.unwrap());

        let (first, second) = tokio::join!(manager.connect("dave"), manager.connect("dave"));
        let first = first.unwrap();
        let second = second.unwrap();
        assert_eq!(first.address(), second.address());
        assert_eq!(manager.list_accounts().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_connect_falls_back_when_account_already_stored() {
        let manager = AccountManager::in_memory();
        let stored = manager.create_account("frank").await.unwrap();

        let connected = manager.connect("frank").await.unwrap();
        assert_eq!(connected, stored);
        assert_eq!(manager.current_address(), Some(stored.address().clone()));
    }
}

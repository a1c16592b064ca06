pub mod account_store;
pub mod ledger_store;

pub use account_store::AccountStore;
pub use ledger_store::LedgerStore;

use crate::error::{ArcadeError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// A single JSON document on disk, or in memory when no path is given.
///
/// Every read-modify-write goes through [`Storage::update`], which holds the
/// lock for the whole cycle.
pub struct Storage {
    path: Option<PathBuf>,
    memory: Mutex<Option<serde_json::Value>>,
}

impl Storage {
    pub async fn new(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ArcadeError::internal(format!("Failed to create directory: {}", e)))?;
        }

        Ok(Self {
            path: Some(path.to_path_buf()),
            memory: Mutex::new(None),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            memory: Mutex::new(None),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub async fn read<T>(&self) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        let memory = self.memory.lock().await;
        self.load(&memory).await
    }

    pub async fn update<T, R, F>(&self, f: F) -> Result<R>
    where
        T: DeserializeOwned + Serialize + Default,
        F: FnOnce(&mut T) -> Result<R>,
    {
        let mut memory = self.memory.lock().await;
        let mut document: T = self.load(&memory).await?;
        let out = f(&mut document)?;

        match &self.path {
            Some(path) => {
                let content = serde_json::to_string_pretty(&document)?;
                let tmp = path.with_extension("json.tmp");
                tokio::fs::write(&tmp, content).await?;
                tokio::fs::rename(&tmp, path).await?;
            }
            None => *memory = Some(serde_json::to_value(&document)?),
        }

        Ok(out)
    }

    async fn load<T>(&self, memory: &Option<serde_json::Value>) -> Result<T>
    where
        T: DeserializeOwned + Default,
    {
        match &self.path {
            Some(path) => match tokio::fs::read_to_string(path).await {
                Ok(content) => Ok(serde_json::from_str(&content)?),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
                Err(e) => Err(e.into()),
            },
            None => match memory {
                Some(value) => Ok(serde_json::from_value(value.clone())?),
                None => Ok(T::default()),
            },
        }
    }
}

use crate::types::Address;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named local account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    id: String,
    name: String,
    address: Address,
    created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(id: String, name: String, address: Address, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            address,
            created_at,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

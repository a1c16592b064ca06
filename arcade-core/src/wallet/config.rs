use crate::error::{ArcadeError, Result};
use crate::types::{Address, TokenAmount};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArcadeConfig {
    pub chain: ChainConfig,
    pub token: TokenContract,
    pub prize: PrizeConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub id: u64,
    pub name: String,
    pub rpc_url: String,
    pub native_currency: NativeCurrency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// The ERC20-style token paid out as the prize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenContract {
    pub address: Address,
    pub chain_id: u64,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrizeConfig {
    /// Whole tokens minted to a winner.
    pub amount_tokens: u64,
    #[serde(default)]
    pub policy: ClaimPolicy,
}

/// Whether a claimed prize blocks further claims for the rest of the session
/// or only for the round it was won in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClaimPolicy {
    #[default]
    PerSession,
    PerRound,
}

const BAKKALGAZI_CHAIN_ID: u64 = 10120;

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            chain: ChainConfig {
                id: BAKKALGAZI_CHAIN_ID,
                name: "Bakkalgazi".to_string(),
                rpc_url: "https://dymrollapp-evm.bakkaligazi.trade".to_string(),
                native_currency: NativeCurrency {
                    name: "Bakkalgazi Token".to_string(),
                    symbol: "BGZ".to_string(),
                    decimals: 18,
                },
            },
            token: TokenContract {
                address: Address::from_bytes(&PRIZE_TOKEN_BYTES),
                chain_id: BAKKALGAZI_CHAIN_ID,
                symbol: "BGZ".to_string(),
                decimals: 18,
            },
            prize: PrizeConfig {
                amount_tokens: 10,
                policy: ClaimPolicy::PerSession,
            },
        }
    }
}

// 0x4ad1AD500e76bEAb7e332cD8692E8BFF0862CdC9
const PRIZE_TOKEN_BYTES: [u8; 20] = [
    0x4a, 0xd1, 0xad, 0x50, 0x0e, 0x76, 0xbe, 0xab, 0x7e, 0x33, 0x2c, 0xd8, 0x69, 0x2e, 0x8b,
    0xff, 0x08, 0x62, 0xcd, 0xc9,
];

impl ArcadeConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise falls back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn prize_amount(&self) -> Result<TokenAmount> {
        TokenAmount::from_tokens(self.prize.amount_tokens, self.token.decimals)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chain.rpc_url.is_empty() {
            return Err(ArcadeError::config("RPC URL cannot be empty"));
        }

        if self.token.chain_id != self.chain.id {
            return Err(ArcadeError::config(format!(
                "Token contract is on chain {} but the configured chain is {}",
                self.token.chain_id, self.chain.id
            )));
        }

        if self.token.decimals > TokenAmount::MAX_DECIMALS {
            return Err(ArcadeError::config(format!(
                "Token decimals must be at most {}",
                TokenAmount::MAX_DECIMALS
            )));
        }

        if self.prize.amount_tokens == 0 {
            return Err(ArcadeError::config("Prize amount must be greater than 0"));
        }

        self.prize_amount()?;
        Ok(())
    }
}

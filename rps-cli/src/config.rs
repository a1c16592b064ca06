use arcade_core::{AccountManager, ArcadeConfig, TokenLedger};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub data_dir: PathBuf,
    pub config_path: PathBuf,
    pub verbose: bool,
}

impl CliConfig {
    pub fn new(data_dir: Option<PathBuf>, config_path: Option<PathBuf>, verbose: bool) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        let config_path = config_path.unwrap_or_else(|| data_dir.join("config.json"));
        Self {
            data_dir,
            config_path,
            verbose,
        }
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join("ledger.json")
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("rps-arcade")
}

/// Everything a command needs, opened once per invocation.
pub struct Context {
    pub settings: CliConfig,
    pub config: ArcadeConfig,
    pub accounts: Arc<AccountManager>,
    pub ledger: Arc<TokenLedger>,
}

impl Context {
    pub async fn open(settings: CliConfig) -> arcade_core::Result<Self> {
        tokio::fs::create_dir_all(&settings.data_dir).await?;

        let config = ArcadeConfig::load_or_default(Some(settings.config_path.as_path()))?;
        let accounts = Arc::new(AccountManager::new(&settings.data_dir).await?);
        let ledger = Arc::new(TokenLedger::open(&settings.ledger_path(), config.chain.id).await?);

        tracing::debug!(
            "Opened data directory {} (chain {})",
            settings.data_dir.display(),
            config.chain.id
        );

        Ok(Self {
            settings,
            config,
            accounts,
            ledger,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.settings.config_path
    }
}

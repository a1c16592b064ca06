use arcade_core::{
    AccountManager, AccountProvider, ArcadeConfig, BalanceReader, ClaimSubmitter, TokenLedger,
};
use tempfile::tempdir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let temp_dir = tempdir()?;
    println!("Using temporary directory: {:?}", temp_dir.path());

    let config = ArcadeConfig::default();
    let manager = AccountManager::new(temp_dir.path()).await?;
    let ledger = TokenLedger::open(&temp_dir.path().join("ledger.json"), config.chain.id).await?;

    println!("Connecting account...");
    let account = manager.connect("example-account").await?;
    println!("Account: {} ({})", account.name(), account.address().shorten());

    let balance = ledger.balance_of(account.address(), &config.token).await?;
    println!("Balance before claim: {}", balance);

    let receipt = ledger
        .claim_to(account.address(), &config.token, config.prize_amount()?)
        .await?;
    println!("Claimed prize, tx {}", receipt.tx_hash);

    let balance = ledger.balance_of(account.address(), &config.token).await?;
    println!("Balance after claim: {}", balance);

    manager.disconnect();
    println!("Connected after logout: {:?}", manager.current_address());

    Ok(())
}

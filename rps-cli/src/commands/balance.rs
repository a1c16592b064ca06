use crate::config::Context;
use arcade_core::BalanceReader;

pub async fn show_balance(ctx: &Context, name: &str) -> anyhow::Result<()> {
    let account = ctx.accounts.load_account(name).await?;
    let balance = ctx
        .ledger
        .balance_of(account.address(), &ctx.config.token)
        .await?;

    println!("Balance for '{}' ({}):", account.name(), account.address().shorten());
    println!("  {} {}", balance.display_value(), balance.symbol);
    println!("  Contract: {}", ctx.config.token.address);
    println!("  Chain: {} ({})", ctx.config.chain.name, ctx.config.chain.id);

    Ok(())
}

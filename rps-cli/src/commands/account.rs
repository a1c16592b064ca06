use crate::config::Context;
use arcade_core::BalanceReader;
use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new local account
    Create {
        /// Account name
        name: String,
    },
    /// List all accounts
    List,
    /// Show account details and prize token balance
    Show {
        /// Account name
        name: String,
    },
}

pub async fn handle_account_command(cmd: AccountCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        AccountCommands::Create { name } => {
            let account = ctx.accounts.create_account(&name).await?;

            println!("Account created successfully!");
            println!("  Name: {}", account.name());
            println!("  ID: {}", account.id());
            println!("  Address: {}", account.address());
        }

        AccountCommands::List => {
            let accounts = ctx.accounts.list_accounts().await?;

            if accounts.is_empty() {
                println!("No accounts found.");
                println!("Create one with: rps account create <name>");
                return Ok(());
            }

            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Name", "Address", "Created"]);

            for account in accounts {
                table.add_row(vec![
                    account.name().to_string(),
                    account.address().shorten(),
                    account.created_at().format("%Y-%m-%d %H:%M").to_string(),
                ]);
            }

            println!("{}", table);
        }

        AccountCommands::Show { name } => {
            let account = ctx.accounts.load_account(&name).await?;
            let balance = ctx
                .ledger
                .balance_of(account.address(), &ctx.config.token)
                .await?;

            println!("Account '{}':", account.name());
            println!("  ID: {}", account.id());
            println!("  Address: {}", account.address());
            println!(
                "  Created: {}",
                account.created_at().format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!("  Balance: {}", balance);
        }
    }

    Ok(())
}

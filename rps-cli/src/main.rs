mod commands;
mod config;

use arcade_core::ArcadeError;
use arcade_rps::GameError;
use clap::{Parser, Subcommand};
use config::{CliConfig, Context};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rps")]
#[command(about = "Rock-Paper-Scissors against the house, winners claim a token prize")]
#[command(version)]
struct Cli {
    /// Data directory for accounts and the token ledger
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Configuration file (defaults to <data-dir>/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive session
    Play {
        /// Account to connect (created on first use)
        account: String,
        /// Seed the house's moves for a reproducible session
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play a single round without prompts
    Round {
        /// Account to connect (created on first use)
        account: String,
        /// Your move: rock, paper or scissors
        choice: String,
        /// Seed the house's move
        #[arg(long)]
        seed: Option<u64>,
        /// Claim the prize right away if the round is won
        #[arg(long)]
        claim: bool,
    },
    /// Show an account's prize token balance
    Balance {
        /// Account name
        account: String,
    },
    /// Account management commands
    #[command(subcommand)]
    Account(commands::AccountCommands),

    /// Configuration commands
    #[command(subcommand)]
    Config(commands::ConfigCommands),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = CliConfig::new(cli.data_dir, cli.config, cli.verbose);

    // Initialize logging
    let log_level = if settings.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!(
            "rps={},arcade_rps={},arcade_core={}",
            log_level, log_level, log_level
        )))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let ctx = Context::open(settings).await?;

    let result = match cli.command {
        Commands::Play { account, seed } => commands::play_interactive(&ctx, &account, seed).await,
        Commands::Round {
            account,
            choice,
            seed,
            claim,
        } => commands::play_single_round(&ctx, &account, &choice, seed, claim).await,
        Commands::Balance { account } => commands::show_balance(&ctx, &account).await,
        Commands::Account(cmd) => commands::handle_account_command(cmd, &ctx).await,
        Commands::Config(cmd) => commands::handle_config_command(cmd, &ctx).await,
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }

    Ok(())
}

fn report(e: &anyhow::Error) {
    let core = e.downcast_ref::<ArcadeError>().or_else(|| {
        e.downcast_ref::<GameError>().and_then(|g| match g {
            GameError::Arcade(inner) => Some(inner),
            _ => None,
        })
    });

    match (core, e.downcast_ref::<GameError>()) {
        (Some(ArcadeError::AccountNotFound { name }), _) => {
            eprintln!("Error: Account '{}' not found", name);
            eprintln!("Use 'rps account list' to see available accounts");
        }
        (Some(ArcadeError::Claim(msg)), _) => {
            eprintln!("Error: Prize claim failed: {}", msg);
            eprintln!("The prize is still unclaimed, try again later");
        }
        (_, Some(GameError::InvalidChoice(choice))) => {
            eprintln!("Error: '{}' is not a move", choice);
            eprintln!("Pick one of: rock, paper, scissors");
        }
        _ => {
            eprintln!("Error: {}", e);
        }
    }
}

use crate::config::Context;
use arcade_rps::{Choice, RpsGame, Round};
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::{Confirm, Select};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    TryAgain,
    ClaimPrize,
    Logout,
}

impl Action {
    fn label(self) -> &'static str {
        match self {
            Action::TryAgain => "Try Again",
            Action::ClaimPrize => "Claim Prize",
            Action::Logout => "Logout",
        }
    }
}

fn new_game(ctx: &Context, seed: Option<u64>) -> anyhow::Result<RpsGame> {
    let game = match seed {
        Some(seed) => RpsGame::with_rng(
            ctx.config.clone(),
            ctx.accounts.clone(),
            ctx.ledger.clone(),
            ctx.ledger.clone(),
            StdRng::seed_from_u64(seed),
        )?,
        None => RpsGame::new(
            ctx.config.clone(),
            ctx.accounts.clone(),
            ctx.ledger.clone(),
            ctx.ledger.clone(),
        )?,
    };
    Ok(game)
}

pub async fn play_interactive(ctx: &Context, account: &str, seed: Option<u64>) -> anyhow::Result<()> {
    ctx.accounts.connect(account).await?;
    let mut game = new_game(ctx, seed)?;

    loop {
        print_header(&mut game).await?;

        let Some(round) = game.session().current_round().cloned() else {
            let mut items: Vec<String> = Choice::ALL
                .iter()
                .map(|c| format!("{} {}", c.symbol(), c))
                .collect();
            items.push(Action::Logout.label().to_string());

            let selection = Select::new()
                .with_prompt("Choose your option")
                .items(&items)
                .default(0)
                .interact()?;

            match Choice::ALL.get(selection) {
                Some(&choice) => {
                    game.choose(choice)?;
                }
                None => {
                    game.disconnect();
                    println!("Logged out.");
                    return Ok(());
                }
            }
            continue;
        };

        print_round(&round);

        let mut actions = vec![Action::TryAgain];
        if game.session().can_open_claim_modal() {
            actions.push(Action::ClaimPrize);
        }
        actions.push(Action::Logout);

        let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
        let selection = Select::new().items(&labels).default(0).interact()?;

        match actions[selection] {
            Action::TryAgain => game.reset(),
            Action::ClaimPrize => claim_flow(&mut game).await?,
            Action::Logout => {
                game.disconnect();
                println!("Logged out.");
                return Ok(());
            }
        }
    }
}

pub async fn play_single_round(
    ctx: &Context,
    account: &str,
    choice: &str,
    seed: Option<u64>,
    claim: bool,
) -> anyhow::Result<()> {
    let choice: Choice = choice.parse()?;

    ctx.accounts.connect(account).await?;
    let mut game = new_game(ctx, seed)?;

    let round = game.choose(choice)?;
    print_round(&round);

    if round.is_win() {
        if claim {
            game.open_claim_modal()?;
            let receipt = game.claim_prize().await?;
            println!("Prize claimed!");
            println!("Transaction: {}", receipt.tx_hash);
        } else {
            println!("You won a prize! Re-run with --claim to collect it.");
        }
    }

    let balance = game.balance().await?;
    println!("Balance: {}", balance);

    game.disconnect();
    Ok(())
}

async fn claim_flow(game: &mut RpsGame) -> anyhow::Result<()> {
    game.open_claim_modal()?;

    let amount = game.config().prize_amount()?;
    let token = game.config().token.clone();

    loop {
        let prompt = format!(
            "Claim {} {} from contract {}?",
            amount.display(token.decimals),
            token.symbol,
            token.address.shorten()
        );

        if !Confirm::new().with_prompt(prompt).default(true).interact()? {
            game.dismiss_claim_modal();
            return Ok(());
        }

        match game.claim_prize().await {
            Ok(receipt) => {
                println!("Prize claimed!");
                println!("Transaction: {}", receipt.tx_hash);
                return Ok(());
            }
            Err(e) => {
                // modal stays open, offer a retry
                eprintln!("Claim failed: {}", e);
            }
        }
    }
}

async fn print_header(game: &mut RpsGame) -> anyhow::Result<()> {
    let Some(address) = game.account() else {
        return Ok(());
    };
    let balance = game.balance().await?;

    println!();
    println!("{}  |  Balance: {}", address.shorten(), balance);
    println!("═══════════════════════════════════");
    Ok(())
}

fn print_round(round: &Round) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["You", "Computer", "Result"]);
    table.add_row(vec![
        format!("{} {}", round.player_choice().symbol(), round.player_choice()),
        format!(
            "{} {}",
            round.computer_choice().symbol(),
            round.computer_choice()
        ),
        round.outcome().to_string(),
    ]);

    println!("{}", table);
}

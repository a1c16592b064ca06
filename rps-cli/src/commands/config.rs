use crate::config::Context;
use anyhow::bail;
use arcade_core::ArcadeConfig;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Write the default configuration to the config path
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

pub async fn handle_config_command(cmd: ConfigCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            println!("# {}", ctx.config_path().display());
            println!("{}", serde_json::to_string_pretty(&ctx.config)?);
        }

        ConfigCommands::Init { force } => {
            let path = ctx.config_path();
            if path.exists() && !force {
                bail!(
                    "{} already exists, pass --force to overwrite",
                    path.display()
                );
            }

            ArcadeConfig::default().save(path)?;
            println!("Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}

//! clipstretch CLI
//!
//! Extends short utterances to a fixed duration for training data.

use clap::Parser;
use env_logger::Env;
use log::info;

use clipstretch::cli::{commands, Cli, Commands};
use clipstretch::ClipError;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    info!("clipstretch v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = handle_command(cli.command) {
        if let Some(clip_error) = e.downcast_ref::<ClipError>() {
            for suggestion in clip_error.recovery_suggestions() {
                eprintln!("hint: {}", suggestion);
            }
        }
        return Err(e);
    }
    Ok(())
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Extend {
            input,
            output,
            config,
        } => {
            let config = config.resolve()?;
            commands::extend(&input, output.as_deref(), &config)?;
        }
        Commands::Variants {
            input,
            out_dir,
            count,
            config,
        } => {
            let config = config.resolve()?;
            commands::variants(&input, &out_dir, count, &config)?;
        }
        Commands::Batch {
            input,
            out_dir,
            variants,
            config,
        } => {
            let config = config.resolve()?;
            commands::batch(&input, &out_dir, variants, &config)?;
        }
    }
    Ok(())
}

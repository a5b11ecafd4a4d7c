//! Parley CLI entry point.
//!
//! Binary name: `parley`
//!
//! Parses CLI arguments, initializes config and service clients, then
//! dispatches to the appropriate command handler.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,parley=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "parley", &mut std::io::stdout());
        return Ok(());
    }

    // Initialize application state (config, service clients)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Signup => cli::auth::signup(&state).await?,
        Commands::Login => cli::auth::login(&state).await?,
        Commands::Confirm { code } => cli::auth::confirm(&state, &code).await?,
        Commands::ResetPassword => cli::auth::reset_password(&state).await?,
        Commands::Logout => cli::auth::logout(&state).await?,
        Commands::Whoami => cli::auth::whoami(&state, cli.json).await?,
        Commands::Chat => cli::chat::run_chat_loop(&state).await?,
        Commands::History => cli::history::show_history(&state, cli.json).await?,
        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

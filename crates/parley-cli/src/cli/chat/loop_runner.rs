//! Main chat loop orchestration.
//!
//! Runs the guarded chat view: gate on the credential session, bind a bot
//! handle to it, seed the transcript from the store, then loop on input,
//! sending one turn at a time. All failure modes degrade to a visible
//! message or a redirect hint; none abort the process.

use console::style;
use tracing::debug;

use parley_core::session::{SessionOutcome, open_session};
use parley_core::transcript::load_history;
use parley_core::turn::TurnHandler;
use parley_infra::bot::HttpBotTurnClient;
use parley_infra::transcript::GraphQlTranscriptStore;
use parley_types::chat::{ChatMessage, Sender};

use crate::state::AppState;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};

fn print_sign_in_hint() {
    println!();
    println!(
        "  {} No active session. Sign in with {} first.",
        style("!").yellow().bold(),
        style("parley login").cyan()
    );
    println!();
}

fn print_message(bot_name: &str, message: &ChatMessage) {
    match message.sender {
        Sender::User => {
            println!("  {} {}", style("You >").green().bold(), message.text);
        }
        Sender::Bot => {
            println!("  {} {}", style(bot_name).cyan().bold(), message.text);
        }
    }
}

/// Run the interactive chat view.
pub async fn run_chat_loop(state: &AppState) -> anyhow::Result<()> {
    // Session gate: no valid session means no chat UI at all.
    let outcome = open_session(&state.provider, |session| {
        HttpBotTurnClient::new(state.config.bot.endpoint.clone(), &session.credentials)
    })
    .await;

    let live = match outcome {
        SessionOutcome::Ready(live) => live,
        SessionOutcome::RedirectToSignIn => {
            print_sign_in_hint();
            return Ok(());
        }
    };

    let Some(store) = state.transcript_store().await else {
        print_sign_in_hint();
        return Ok(());
    };

    let bot_name = state.config.bot.display_name.clone();
    print_welcome_banner(&bot_name, &state.config.bot.bot_id, &live.session_id);

    // Seed the view with persisted history, oldest first.
    let history = load_history(&store).await;
    let mut handler: TurnHandler<HttpBotTurnClient, GraphQlTranscriptStore> =
        TurnHandler::new(Some(live.bot), store, &state.config.bot, live.session_id);

    if !history.is_empty() {
        for message in &history {
            print_message(&bot_name, message);
        }
        println!("  {}", style("---").dim());
        println!();
        handler.seed(history);
    }

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(cmd) = commands::parse(&text) {
                    match cmd {
                        ChatCommand::Help => commands::print_help(),
                        ChatCommand::Clear => chat_input.clear(),
                        ChatCommand::History => {
                            println!();
                            for message in handler.transcript() {
                                print_message(&bot_name, message);
                            }
                            println!();
                        }
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::Unknown(cmd_name) => {
                            println!(
                                "\n  {} Unknown command: {}. Type /help for available commands.\n",
                                style("?").yellow().bold(),
                                style(cmd_name).dim()
                            );
                        }
                    }
                    continue;
                }

                let spinner = indicatif::ProgressBar::new_spinner();
                spinner.set_style(
                    indicatif::ProgressStyle::default_spinner()
                        .template("{spinner:.cyan} {msg}")
                        .unwrap(),
                );
                spinner.set_message("thinking...");
                spinner.enable_steady_tick(std::time::Duration::from_millis(80));

                let exchange = handler.send_turn(&text).await;
                spinner.finish_and_clear();

                match exchange {
                    Some(exchange) => {
                        println!();
                        print_message(&bot_name, &exchange.bot);
                        println!();
                    }
                    None => {
                        // Empty after trimming; nothing was sent.
                        debug!("skipped empty turn");
                    }
                }
            }
        }
    }

    Ok(())
}

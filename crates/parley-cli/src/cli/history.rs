//! Persisted conversation history listing.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use parley_core::transcript::load_history;
use parley_types::chat::Sender;

use crate::state::AppState;

/// Show the persisted transcript, oldest first.
///
/// Guarded like the chat view: without a valid session this prints the
/// sign-in hint and renders nothing.
pub async fn show_history(state: &AppState, json: bool) -> Result<()> {
    let Some(store) = state.transcript_store().await else {
        println!();
        println!(
            "  {} No active session. Sign in with {} first.",
            style("!").yellow().bold(),
            style("parley login").cyan()
        );
        println!();
        return Ok(());
    };

    let messages = load_history(&store).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!();
        println!(
            "  {} No messages yet. Start a conversation with: {}",
            style("i").blue().bold(),
            style("parley chat").yellow()
        );
        println!();
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("When").fg(Color::White),
        Cell::new("Sender").fg(Color::White),
        Cell::new("Message").fg(Color::White),
    ]);

    for message in &messages {
        let sender_cell = match message.sender {
            Sender::User => Cell::new("You").fg(Color::Green),
            Sender::Bot => Cell::new("Bot").fg(Color::Cyan),
        };
        table.add_row(vec![
            Cell::new(message.created_at.format("%Y-%m-%d %H:%M").to_string()),
            sender_cell,
            Cell::new(&message.text),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    Ok(())
}

//! Welcome banner for the chat view.

use console::style;

/// Print the banner when the chat view opens: the assistant's name, the
/// bot identifier, and a shortened session id.
pub fn print_welcome_banner(name: &str, bot_id: &str, session_id: &str) {
    println!();
    println!("  {}", style(name).cyan().bold());
    println!();
    println!("  {}  {}", style("Bot:").bold(), style(bot_id).dim());
    println!(
        "  {}  {}",
        style("Session:").bold(),
        style(&session_id[..12.min(session_id.len())]).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

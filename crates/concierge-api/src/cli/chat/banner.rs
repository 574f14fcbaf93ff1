//! Welcome banner display for chat sessions.

use console::style;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(model: &str, endpoint: &str, listings: usize, session_id: &str) {
    println!();
    println!(
        "  {} {}",
        "🏡",
        style("Offbeat Retreats Concierge").cyan().bold()
    );
    println!(
        "  {}",
        style("Quirky stays, matched to you in a couple of questions.").dim()
    );
    println!();
    println!("  {}     {}", style("Model:").bold(), style(model).dim());
    println!("  {}  {}", style("Endpoint:").bold(), style(endpoint).dim());
    println!("  {}   {}", style("Catalog:").bold(), style(listing_label(listings)).dim());
    println!(
        "  {}   {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

fn listing_label(listings: usize) -> String {
    match listings {
        0 => "no listings loaded".to_string(),
        1 => "1 listing".to_string(),
        n => format!("{n} listings"),
    }
}

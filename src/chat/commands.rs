//! Slash command handlers for the chat REPL.
//!
//! Dispatches `/history`, `/reset`, and `/help` commands. Returns a
//! [`CommandAction`] so the REPL loop can decide how to proceed.

use colored::Colorize;

use crate::agent::Generator;
use crate::session::ChatSession;

/// Action returned by slash command handling.
pub(crate) enum CommandAction {
    /// Command was handled successfully; continue the REPL loop.
    Continue,
    /// Unknown command was entered.
    Unknown(String),
}

/// Dispatch and handle a slash command.
///
/// Matches the input against known commands and executes the appropriate
/// handler. Returns [`CommandAction::Unknown`] for unrecognized commands.
pub(crate) fn handle_slash_command<G: Generator>(
    command: &str,
    session: &mut ChatSession<G>,
) -> CommandAction {
    match command {
        "/history" => {
            let history = session.history();
            if history.is_empty() {
                println!("{}", "No conversation yet.".dimmed());
            }
            for exchange in &history {
                println!("{} {}", "you:".bold().green(), exchange.user);
                println!("{} {}", "hira:".bold().cyan(), exchange.assistant);
                println!();
            }
            CommandAction::Continue
        }
        "/reset" => {
            session.reset();
            println!("{}", "History cleared.".dimmed());
            CommandAction::Continue
        }
        "/help" => {
            println!("{}", "Commands:".bold());
            println!("  {} - show conversation history", "/history".cyan());
            println!("  {} - clear conversation", "/reset".cyan());
            println!("  {} - show this help", "/help".cyan());
            println!("  {} - exit", "Ctrl+D".cyan());
            CommandAction::Continue
        }
        _ => CommandAction::Unknown(command.to_string()),
    }
}

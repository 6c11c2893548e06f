//! Interactive chat REPL for hira.
//!
//! Provides a multi-turn conversation loop using [`rustyline`] for readline
//! support (history, line editing). Each turn runs one fresh dispatch loop
//! against the HR lookup tools; turns are contextually independent (see
//! [`ChatSession`]).

mod commands;

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::config::Config;
use crate::provider::{ModelSelection, Provider};
use crate::session::ChatSession;
use crate::tools::ToolRegistry;

/// Runs the interactive chat REPL.
///
/// Builds the provider and tool registry, then enters a readline loop where
/// each user input is submitted as one turn of a [`ChatSession`].
///
/// # Readline behavior
///
/// - **Ctrl+C**: cancels current input, stays in REPL
/// - **Ctrl+D**: exits cleanly with "goodbye."
/// - Readline history is persisted to `~/.cache/hira/chat_history.txt`
///
/// # Arguments
///
/// * `config` — The loaded hira configuration.
/// * `selection` — The resolved provider + model to use.
pub async fn run_chat(config: Config, selection: &ModelSelection) -> Result<()> {
    let provider = Provider::from_config(&config, selection)?;
    let tools = ToolRegistry::with_builtins(config.data_dir());
    let mut session = ChatSession::new(provider, tools, config.loop_config());

    println!(
        "{} [model: {}] (Ctrl+D to exit)",
        "hira chat".bold().cyan(),
        selection.model.yellow(),
    );
    println!(
        "{}",
        "Ask about employee details, leave balances, or interview questions.".dimmed()
    );
    println!();

    // Set up readline with persistent history
    let mut rl = DefaultEditor::new()?;
    let history_path = Config::cache_dir()?.join(crate::constants::HISTORY_FILENAME);
    if history_path.exists() {
        let _ = rl.load_history(&history_path);
    }

    loop {
        let readline = rl.readline(&format!("{} ", ">".green().bold()));

        match readline {
            Ok(line) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }

                // Slash commands
                if line.starts_with('/') {
                    match commands::handle_slash_command(&line, &mut session) {
                        commands::CommandAction::Continue => continue,
                        commands::CommandAction::Unknown(cmd) => {
                            println!("{} Unknown command: {}", "?".yellow(), cmd);
                            continue;
                        }
                    }
                }

                let _ = rl.add_history_entry(&line);
                println!();

                let reply = session.submit(&line).await;
                println!("{}", reply);
                println!();
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".dimmed());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "goodbye.".dimmed());
                break;
            }
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                break;
            }
        }
    }

    // Save readline history
    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = rl.save_history(&history_path);

    Ok(())
}

//! Command-line interface definition and dispatch for hira.
//!
//! Uses [`clap`] for argument parsing with derive macros. Each subcommand is
//! routed to its handler.

use crate::{chat, config, provider, session::ChatSession, tools::ToolRegistry};
use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

/// Top-level CLI structure for hira.
///
/// Parsed from command-line arguments via [`clap::Parser`]. Contains a single
/// required subcommand that determines which action hira performs.
#[derive(Parser)]
#[command(name = "hira", about = "An HR assistant agent for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the hira CLI.
///
/// Each variant maps to a top-level action. The `///` doc comments on variants
/// double as `--help` text rendered by clap.
#[derive(Subcommand)]
pub enum Commands {
    /// Ask a one-shot question
    Ask {
        /// The question to ask
        prompt: Vec<String>,
        /// Model to use (overrides config)
        #[arg(short, long)]
        model: Option<String>,
        /// Provider to use (anthropic, openai, openrouter, ollama)
        #[arg(short, long)]
        provider: Option<String>,
        /// Directory holding the backing CSV tables (overrides config)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Start an interactive chat session
    Chat {
        /// Provider to use (anthropic, openai, openrouter, ollama)
        #[arg(long)]
        provider: Option<String>,
        /// Model to use (overrides config)
        #[arg(short, long)]
        model: Option<String>,
        /// Directory holding the backing CSV tables (overrides config)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// List the registered lookup tools
    Tools,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Subcommands for the `config` command.
///
/// Controls reading hira's TOML configuration file stored at the XDG config
/// path (`~/.config/hira/config.toml`).
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current config
    Show,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its handler.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Ask {
            prompt,
            model,
            provider: provider_name,
            data_dir,
        } => {
            let prompt = prompt.join(" ");
            if prompt.is_empty() {
                anyhow::bail!("No prompt provided. Usage: hira ask \"your question here\"");
            }

            let mut config = config::Config::load()?;
            if data_dir.is_some() {
                config.data_dir = data_dir;
            }
            let selection =
                provider::resolve_model(provider_name.as_deref(), model.as_deref(), &config)?;

            println!(
                "{} [model: {}]",
                "hira".bold().cyan(),
                selection.model.yellow(),
            );
            println!();
            println!("{} {}", ">".green().bold(), prompt);
            println!();

            let provider = provider::Provider::from_config(&config, &selection)?;
            let tools = ToolRegistry::with_builtins(config.data_dir());
            let mut session = ChatSession::new(provider, tools, config.loop_config());

            let reply = session.submit(&prompt).await;
            println!("{}", reply);

            Ok(())
        }
        Commands::Chat {
            provider: provider_name,
            model,
            data_dir,
        } => {
            let mut config = config::Config::load()?;
            if data_dir.is_some() {
                config.data_dir = data_dir;
            }
            let selection =
                provider::resolve_model(provider_name.as_deref(), model.as_deref(), &config)?;
            chat::run_chat(config, &selection).await
        }
        Commands::Tools => {
            let config = config::Config::load()?;
            let tools = ToolRegistry::with_builtins(config.data_dir());
            println!("{}", "Registered tools:".bold());
            for tool in tools.iter() {
                println!(
                    "  {} - {} {}",
                    tool.name().cyan(),
                    tool.description(),
                    tool.usage().dimmed()
                );
            }
            Ok(())
        }
        Commands::Config { action } => {
            let config = config::Config::load()?;
            match action {
                ConfigAction::Show => {
                    let path = config::Config::config_path()?;
                    println!("{} {}", "Config path:".bold(), path.display());
                    println!();
                    let toml_str = toml::to_string_pretty(&config)?;
                    println!("{}", toml_str);
                }
            }
            Ok(())
        }
    }
}

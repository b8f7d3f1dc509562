mod commands;
mod config;

use crate::config::{Config, Overrides};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// Route UI/UX requests to knowledge modules and report tool integrations
#[derive(Parser, Debug)]
#[command(name = "steerkit", version, about)]
struct Cli {
    /// Content root holding the steering directory and capability declarations
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Extra configuration file layered over the defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG wins when set
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check registry and capability invariants (exit 0 when clean, 1 on violations)
    Validate,

    /// List registered knowledge modules
    Modules,

    /// Route a single request and show what would be loaded
    Route {
        /// Request text
        query: Vec<String>,

        /// Read a hook-style JSON object ({"prompt": "..."}) from stdin instead
        #[arg(long)]
        stdin: bool,

        /// Print the full turn report as JSON
        #[arg(long)]
        json: bool,

        /// Print loaded module bodies
        #[arg(long)]
        content: bool,
    },

    /// Show which tool integrations are configured in this environment
    Capabilities {
        /// Print statuses as JSON
        #[arg(long)]
        json: bool,
    },

    /// Route one request per stdin line within a single session
    Chat {
        /// Conversation id for the session (generated when omitted)
        #[arg(long)]
        session: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load(&Overrides {
        config_file: cli.config,
        root: cli.root,
        log_level: cli.log_level,
    })?;

    if config.logging.json {
        steerkit_logging::init_json_logging(&config.logging.level)?;
    } else {
        steerkit_logging::init_logging(&config.logging.level)?;
    }

    match cli.command {
        Command::Validate => commands::validate(&config),
        Command::Modules => commands::modules(&config),
        Command::Route {
            query,
            stdin,
            json,
            content,
        } => commands::route(&config, &query, stdin, json, content),
        Command::Capabilities { json } => commands::capabilities(&config, json),
        Command::Chat { session } => commands::chat(&config, session.as_deref()),
    }
}

//! Heroes CLI - browse and edit the hero roster

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use heroes_core::{Backend, Config, HeroId};
use std::path::PathBuf;

mod commands;
mod format;
mod logging;

use commands::{
  cmd_add, cmd_config_init, cmd_config_path, cmd_config_show, cmd_delete, cmd_get, cmd_list, cmd_search, cmd_update,
  connect,
};
use format::format_messages;
use logging::init_cli_logging;

#[derive(Parser)]
#[command(name = "heroes")]
#[command(about = "Browse and edit the hero roster")]
#[command(after_help = "\
QUICK START:
  heroes list                     # List all heroes
  heroes get 12                   # Show one hero
  heroes add \"Windstorm\"          # Create a hero
  heroes search                   # Type terms, one per line

BACKENDS:
  memory  - In-process sample data (default)
  http    - Server at [api].base_url, e.g. --backend http --url http://localhost:3000")]
struct Cli {
  /// Config file (default: ~/.config/heroes/config.toml)
  #[arg(long, global = true, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Backend override: memory or http
  #[arg(long, global = true)]
  backend: Option<Backend>,

  /// Server origin override for the http backend
  #[arg(long, global = true, value_name = "URL")]
  url: Option<String>,

  #[command(subcommand)]
  command: Commands,
}

/// Subcommands for `heroes config`
#[derive(Subcommand)]
enum ConfigCommand {
  /// Show current effective configuration
  Show,
  /// Print the user config file path
  Path,
  /// Write a commented default config file
  Init {
    /// Destination (default: user config path)
    #[arg(long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Overwrite an existing file
    #[arg(long)]
    force: bool,
  },
}

#[derive(Subcommand)]
enum Commands {
  /// List all heroes
  List,
  /// Show a hero by id
  Get {
    id: HeroId,
    /// Report a missing hero without treating it as a failure
    #[arg(long)]
    no_404: bool,
  },
  /// Create a hero
  Add {
    name: String,
    /// Request a specific id instead of the next free one
    #[arg(long)]
    id: Option<HeroId>,
  },
  /// Rename a hero
  Update { id: HeroId, name: String },
  /// Delete a hero by id
  Delete { id: HeroId },
  /// Search heroes by name
  #[command(after_help = "\
Without TERM, each line read from stdin is a new search term. Results print
once typing pauses for the configured debounce window ([search].debounce_ms).")]
  Search {
    /// Run a single search instead of reading terms from stdin
    term: Option<String>,
    /// Debounce window in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,
  },
  /// Manage configuration
  Config {
    #[command(subcommand)]
    command: ConfigCommand,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
  if let Some(backend) = cli.backend {
    config.api.backend = backend;
  }
  if let Some(url) = cli.url {
    config.api.base_url = url;
  }

  init_cli_logging(&config.log.level);

  let service = connect(&config);

  match cli.command {
    Commands::List => cmd_list(&service).await?,
    Commands::Get { id, no_404 } => cmd_get(&service, id, no_404).await?,
    Commands::Add { name, id } => cmd_add(&service, &name, id).await?,
    Commands::Update { id, name } => cmd_update(&service, id, &name).await?,
    Commands::Delete { id } => cmd_delete(&service, id).await?,
    Commands::Search { term, debounce_ms } => {
      let debounce = debounce_ms.map_or(config.search.debounce(), std::time::Duration::from_millis);
      cmd_search(&service, term, debounce).await?
    }
    Commands::Config { command } => {
      return match command {
        ConfigCommand::Show => cmd_config_show(&config, cli.config.as_deref()),
        ConfigCommand::Path => cmd_config_path(),
        ConfigCommand::Init { output, force } => cmd_config_init(output, force),
      };
    }
  }

  let messages = format_messages(service.messages());
  if !messages.is_empty() {
    println!("{}", messages);
  }

  Ok(())
}

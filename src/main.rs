//! Portal Mentions - Main entrypoint.
//!
//! Command line front end for exercising mention completion against JSON
//! candidate files. It loads configuration, initializes logging and prints
//! the suggestions a comment box would show for a given text and cursor.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use portal_mentions_lib::config::{self, ConfigLoader, LogConfig, MentionsConfig};
use portal_mentions_lib::error::{MentionsError, MentionsResult};
use portal_mentions_lib::mentions::candidates::{load_candidates, Instrument, User};
use portal_mentions_lib::mentions::MentionComposer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command line arguments.
#[derive(Parser, Debug)]
#[clap(name = "Portal Mentions", version, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Print the suggestions for the mention token at the cursor
    Suggest {
        /// JSON array of users
        #[clap(short, long, value_parser)]
        users: Option<PathBuf>,

        /// JSON array of instruments
        #[clap(short, long, value_parser)]
        instruments: Option<PathBuf>,

        /// Text of the comment being composed
        #[clap(short, long)]
        text: String,

        /// Cursor position as a char index (defaults to end of text)
        #[clap(long)]
        cursor: Option<usize>,

        /// Override the configured suggestion limit
        #[clap(short, long)]
        limit: Option<usize>,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// so stdout carries only suggestions.
fn init_logging(log: &LogConfig) -> MentionsResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(log.source_location)
        .with_line_number(log.source_location);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };

    result.map_err(|e| MentionsError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Loads configuration, logging the failure before handing it back.
fn load_config(loader: &ConfigLoader) -> MentionsResult<MentionsConfig> {
    loader.load().map_err(|e| {
        // Logging is not configured yet; fall back to defaults to report.
        let _ = init_logging(&LogConfig::default());
        error!(error = %e, "Failed to load configuration");
        e.into()
    })
}

/// Reads one candidate file, or nothing when no path was given.
fn read_candidates<T>(path: Option<&Path>, kind: &str) -> anyhow::Result<Vec<T>>
where
    T: serde::de::DeserializeOwned,
{
    let Some(path) = path else {
        return Ok(Vec::new());
    };

    load_candidates(path).map_err(|e| {
        error!(error = %e, path = ?e.candidate_path(), kind, "Failed to load candidates");
        e
    })
    .with_context(|| format!("No {kind} suggestions available"))
}

/// Main entry point for the application.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config_loader = ConfigLoader::new(args.config.as_deref(), config::ENV_PREFIX);
    let mut config = load_config(&config_loader)?;

    init_logging(&config.log)?;

    match args.command {
        Command::Suggest {
            users,
            instruments,
            text,
            cursor,
            limit,
        } => {
            if let Some(limit) = limit {
                config.completion = config
                    .completion
                    .with_suggestion_limit(limit)
                    .map_err(MentionsError::from)?;
            }

            let users: Vec<User> = read_candidates(users.as_deref(), "user")?;
            let instruments: Vec<Instrument> =
                read_candidates(instruments.as_deref(), "instrument")?;

            let mut composer = MentionComposer::new(config.completion);
            composer.set_users(&users);
            composer.set_instruments(&instruments);

            let cursor = cursor.unwrap_or_else(|| text.chars().count());
            let suggestions = composer.suggest(&text, cursor);
            info!(count = suggestions.len(), "Suggestions computed");

            for line in suggestions.lines() {
                println!("{line}");
            }
            Ok(())
        }
        Command::Validate => {
            info!("Configuration validated successfully");
            println!("Configuration is valid");
            Ok(())
        }
        Command::GenConfig { output } => {
            info!("Generating default configuration");
            let default_config = MentionsConfig::default();

            if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(MentionsError::Io)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| MentionsError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml).map_err(MentionsError::Io)?;

            info!("Default configuration written to {:?}", output);
            Ok(())
        }
    }
}

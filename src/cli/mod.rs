//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod console;
mod generate;
mod saved;
pub mod session;

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, HueConfig};
use crate::share::colors_param;
use crate::store::PaletteStore;

pub use console::{ConsoleNotifier, SystemClipboard};
pub use saved::SavedAction;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Huebox - generate, lock, share and save color palettes
#[derive(Parser)]
#[command(name = "hue")]
#[command(about = "Huebox - generate, lock, share and save color palettes")]
#[command(version)]
pub struct Cli {
    /// Path to hue.toml (default: discovered from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Saved-palette file to use instead of the configured slot
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Origin used for share links
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a palette, optionally keeping locked colors from an existing one
    Generate {
        /// Starting palette: share link or `colors` value (default: random)
        #[arg(short, long)]
        colors: Option<String>,

        /// Slot to keep from the starting palette (0-4, repeatable)
        #[arg(short, long = "lock")]
        locks: Vec<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the share link for a palette
    Share {
        /// Palette to share: share link or `colors` value (default: random)
        #[arg(short, long)]
        colors: Option<String>,

        /// Also copy the link to the system clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Decode a share link or `colors` value
    Decode {
        /// Share link, query string, or bare `colors` value
        input: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage saved palettes
    Saved {
        #[command(subcommand)]
        action: SavedAction,
    },

    /// Interactive session: press Enter to regenerate, lock colors, save and share
    Session {
        /// Starting palette: share link or `colors` value (default: random)
        #[arg(short, long)]
        colors: Option<String>,
    },
}

/// Resolve user input to a `colors` parameter value.
///
/// Share links and query strings yield their `colors` pair; anything else
/// is taken to be the value itself.
pub(crate) fn param_from_input(input: &str) -> String {
    match colors_param(input) {
        Some(param) => param.into_owned(),
        None => input.to_string(),
    }
}

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: failed to serialize output: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load configuration and apply command-line overrides.
fn resolve_config(cli: &Cli) -> Result<HueConfig, String> {
    let mut config = load_config(cli.config.as_deref()).map_err(|e| e.to_string())?;
    let overrides = CliOverrides { store: cli.store.clone(), base_url: cli.base_url.clone() };
    merge_cli_overrides(&mut config, &overrides);

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n"));
    }
    Ok(config)
}

/// Open the configured storage slot, falling back to memory when there is none.
pub(crate) fn open_store(config: &HueConfig) -> PaletteStore {
    match config.storage.slot_path() {
        Some(path) => {
            log::debug!("using storage slot {}", path.display());
            PaletteStore::open(path)
        }
        None => {
            log::warn!("no data directory available; saved palettes will not persist");
            PaletteStore::in_memory()
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .try_init();
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    match cli.command {
        Commands::Generate { colors, locks, json } => {
            generate::run_generate(&config, colors.as_deref(), &locks, json)
        }
        Commands::Share { colors, copy } => generate::run_share(&config, colors.as_deref(), copy),
        Commands::Decode { input, json } => generate::run_decode(&input, json),
        Commands::Saved { action } => saved::run_saved(&config, action),
        Commands::Session { colors } => session::run_session(&config, colors.as_deref()),
    }
}

//! Saved palette commands (list, add, remove)

use clap::Subcommand;
use std::process::ExitCode;

use crate::config::HueConfig;
use crate::controller::{PaletteController, PaletteSource};
use crate::palette::PALETTE_SIZE;
use crate::share::encode;
use crate::terminal::{render_strip, stdout_supports_color};

use super::console::{ConsoleNotifier, SystemClipboard};
use super::{open_store, param_from_input, print_json, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

#[derive(Subcommand)]
pub enum SavedAction {
    /// List saved palettes with their indices
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a palette (duplicates are skipped)
    Add {
        /// Share link or `colors` value
        input: String,
    },
    /// Delete the saved palette at INDEX
    Remove {
        /// Position in `hue saved list`
        index: usize,
    },
}

/// Execute the saved command
pub fn run_saved(config: &HueConfig, action: SavedAction) -> ExitCode {
    let mut controller = PaletteController::new(
        open_store(config),
        config.share.base_url.clone(),
        SystemClipboard::new(),
        ConsoleNotifier,
    );

    match action {
        SavedAction::List { json } => {
            let saved = controller.saved();
            if json {
                return print_json(saved);
            }
            if saved.is_empty() {
                println!("No saved palettes.");
            } else {
                let ansi = stdout_supports_color();
                for (i, palette) in saved.iter().enumerate() {
                    println!("{:>3}  {}  {}", i, render_strip(palette, ansi), encode(palette));
                }
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        SavedAction::Add { input } => {
            let param = param_from_input(&input);
            if controller.initialize(Some(param.as_str())) != PaletteSource::SharedLink {
                eprintln!("Error: '{}' is not a {}-color palette", input, PALETTE_SIZE);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
            if !controller.palette().is_valid() {
                eprintln!("Error: '{}' contains colors that are not 6-digit hex", input);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
            controller.save_current();
            ExitCode::from(EXIT_SUCCESS)
        }
        SavedAction::Remove { index } => {
            if controller.delete_saved(index) {
                ExitCode::from(EXIT_SUCCESS)
            } else {
                ExitCode::from(EXIT_ERROR)
            }
        }
    }
}

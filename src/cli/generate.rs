//! Stateless palette commands (generate, share, decode)

use serde_json::json;
use std::process::ExitCode;

use crate::config::HueConfig;
use crate::controller::PaletteController;
use crate::palette::{generate, LockMask, Palette, PALETTE_SIZE};
use crate::share::{decode, encode, share_url};
use crate::store::PaletteStore;
use crate::terminal::{render_palette, stdout_supports_color};

use super::console::{ConsoleNotifier, SystemClipboard};
use super::{param_from_input, print_json, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the generate command
pub fn run_generate(config: &HueConfig, colors: Option<&str>, locks: &[usize], json: bool) -> ExitCode {
    let mask = match LockMask::with_locked(locks) {
        Ok(mask) => mask,
        Err(index) => {
            eprintln!("Error: lock index {} is out of range (0-{})", index, PALETTE_SIZE - 1);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let start = match colors {
        Some(input) => match decode(Some(param_from_input(input).as_str())) {
            Some(palette) => palette,
            None => {
                eprintln!("Error: '{}' is not a {}-color palette", input, PALETTE_SIZE);
                return ExitCode::from(EXIT_INVALID_ARGS);
            }
        },
        None => {
            if mask.locked_count() > 0 {
                log::warn!("--lock without --colors keeps slots of a random palette");
            }
            Palette::random()
        }
    };

    let palette = generate(&mask, &start);
    let link = share_url(&config.share.base_url, &palette);

    if json {
        let output = json!({
            "colors": palette,
            "locked": mask.as_slice(),
            "param": encode(&palette),
            "share_url": link,
        });
        return print_json(&output);
    }
    print!("{}", render_palette(&palette, Some(&mask), stdout_supports_color()));
    println!();
    println!("share: {}", link);
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the share command
///
/// The link always goes to stdout. With `copy` it is also put on the system
/// clipboard, and a clipboard failure makes the command fail.
pub fn run_share(config: &HueConfig, colors: Option<&str>, copy: bool) -> ExitCode {
    let mut controller = PaletteController::new(
        PaletteStore::in_memory(),
        config.share.base_url.clone(),
        SystemClipboard::new(),
        ConsoleNotifier,
    );

    if let Some(input) = colors {
        let param = param_from_input(input);
        if decode(Some(param.as_str())).is_none() {
            eprintln!("Error: '{}' is not a {}-color palette", input, PALETTE_SIZE);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
        controller.initialize(Some(param.as_str()));
    }

    println!("{}", controller.share_link());
    if copy && !controller.share() {
        return ExitCode::from(EXIT_ERROR);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the decode command
pub fn run_decode(input: &str, json: bool) -> ExitCode {
    let param = param_from_input(input);
    let Some(palette) = decode(Some(param.as_str())) else {
        eprintln!("Error: could not decode a {}-color palette from '{}'", PALETTE_SIZE, input);
        return ExitCode::from(EXIT_ERROR);
    };

    let invalid: Vec<usize> =
        palette.iter().enumerate().filter(|(_, c)| !c.is_valid()).map(|(i, _)| i).collect();

    if json {
        let output = json!({
            "colors": palette,
            "valid": invalid.is_empty(),
            "invalid_positions": invalid,
        });
        return print_json(&output);
    }
    print!("{}", render_palette(&palette, None, stdout_supports_color()));
    for i in &invalid {
        eprintln!("Warning: color {} ('{}') is not a 6-digit hex color", i, palette[*i]);
    }
    ExitCode::from(EXIT_SUCCESS)
}

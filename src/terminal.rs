//! Terminal rendering utilities for palette display
//!
//! Provides ANSI escape sequence generation for showing colors as true-color
//! swatches in terminal emulators that support 24-bit color.

use image::Rgba;

use crate::color::Color;
use crate::palette::{LockMask, Palette};

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// Convert RGBA color to ANSI 24-bit background escape sequence.
///
/// # Examples
///
/// ```
/// use huebox::terminal::color_to_ansi_bg;
/// use image::Rgba;
///
/// let red = color_to_ansi_bg(Rgba([255, 0, 0, 255]));
/// assert_eq!(red, "\x1b[48;2;255;0;0m");
/// ```
pub fn color_to_ansi_bg(rgba: Rgba<u8>) -> String {
    format!("\x1b[48;2;{};{};{}m", rgba[0], rgba[1], rgba[2])
}

/// Black or white foreground, whichever reads better on `rgba`.
pub fn contrast_fg(rgba: Rgba<u8>) -> &'static str {
    // Rec. 601 luma, integer form
    let luma = (299 * rgba[0] as u32 + 587 * rgba[1] as u32 + 114 * rgba[2] as u32) / 1000;
    if luma > 140 {
        "\x1b[38;2;0;0;0m"
    } else {
        "\x1b[38;2;255;255;255m"
    }
}

/// Render one color as a labelled swatch.
///
/// With `ansi` off, or for a malformed color, the label is returned plain.
pub fn render_swatch(color: &Color, ansi: bool) -> String {
    let label = format!(" {} ", color.display_code());
    match color.to_rgba() {
        Some(rgba) if ansi => {
            format!("{}{}{}{}", color_to_ansi_bg(rgba), contrast_fg(rgba), label, ANSI_RESET)
        }
        Some(_) => label,
        None => format!("{}(invalid)", label),
    }
}

/// Render a palette, one slot per line, marking locked slots.
pub fn render_palette(palette: &Palette, locks: Option<&LockMask>, ansi: bool) -> String {
    let mut output = String::new();
    for (i, color) in palette.iter().enumerate() {
        let marker = match locks {
            Some(mask) if mask.is_locked(i) => " [locked]",
            _ => "",
        };
        output.push_str(&format!("  {} {}{}\n", i, render_swatch(color, ansi), marker));
    }
    output
}

/// Render a palette on a single line, as used in the saved list.
pub fn render_strip(palette: &Palette, ansi: bool) -> String {
    let separator = if ansi { "" } else { " " };
    palette.iter().map(|c| render_swatch(c, ansi)).collect::<Vec<_>>().join(separator)
}

/// True when stdout is a terminal and `NO_COLOR` is not set.
pub fn stdout_supports_color() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

//! Interactive palette session
//!
//! Reads one command per line. An empty line (or a bare space) acts as the
//! space-bar shortcut and regenerates every unlocked color.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use crate::config::HueConfig;
use crate::controller::{Clipboard, Focus, Key, Notifier, PaletteController};
use crate::terminal::{render_palette, render_strip, stdout_supports_color};

use super::console::{ConsoleNotifier, SystemClipboard};
use super::{open_store, param_from_input, EXIT_ERROR, EXIT_SUCCESS};

const HELP: &str = "\
Commands:
  <enter>      generate a new palette (locked colors are kept)
  lock N       lock/unlock color N
  copy N       copy color N
  share        show and copy the share link
  save         save the current palette
  saved        list saved palettes
  load N       load saved palette N
  delete N     delete saved palette N
  help         show this help
  quit         leave the session
";

/// A parsed session command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Empty input: behaves like the space-bar shortcut
    Space,
    Generate,
    Lock(usize),
    Copy(usize),
    Share,
    Save,
    Saved,
    Load(usize),
    Delete(usize),
    Help,
    Quit,
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(SessionCommand::Space);
    };
    let arg = words.next();

    let index = |name: &str| -> Result<usize, String> {
        let raw = arg.ok_or_else(|| format!("'{}' needs a position, e.g. '{} 0'", name, name))?;
        raw.parse::<usize>().map_err(|_| format!("'{}' is not a position", raw))
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "g" | "gen" | "generate" => SessionCommand::Generate,
        "l" | "lock" => SessionCommand::Lock(index("lock")?),
        "c" | "copy" => SessionCommand::Copy(index("copy")?),
        "share" => SessionCommand::Share,
        "s" | "save" => SessionCommand::Save,
        "saved" | "list" => SessionCommand::Saved,
        "load" => SessionCommand::Load(index("load")?),
        "d" | "delete" => SessionCommand::Delete(index("delete")?),
        "h" | "help" | "?" => SessionCommand::Help,
        "q" | "quit" | "exit" => SessionCommand::Quit,
        other => return Err(format!("unknown command '{}' (try 'help')", other)),
    };
    Ok(command)
}

/// Execute the session command
pub fn run_session(config: &HueConfig, colors: Option<&str>) -> ExitCode {
    let mut controller = PaletteController::new(
        open_store(config),
        config.share.base_url.clone(),
        SystemClipboard::new(),
        ConsoleNotifier,
    );
    let param = colors.map(param_from_input);
    controller.initialize(param.as_deref());

    let stdin = io::stdin();
    let stdout = io::stdout();
    match run_session_io(&mut controller, stdin.lock(), stdout.lock(), stdout_supports_color()) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Drive a controller from line-based input until `quit` or end of input.
pub fn run_session_io<C, N, R, W>(
    controller: &mut PaletteController<C, N>,
    input: R,
    mut output: W,
    ansi: bool,
) -> io::Result<()>
where
    C: Clipboard,
    N: Notifier,
    R: BufRead,
    W: Write,
{
    write!(output, "{}", render_palette(controller.palette(), Some(controller.locks()), ansi))?;
    writeln!(output, "Press Enter for a new palette, 'help' for commands.")?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "{}", message)?;
                continue;
            }
        };

        let redraw = match command {
            SessionCommand::Space => controller.handle_key(Key::Space, Focus::None),
            SessionCommand::Generate => {
                controller.generate();
                true
            }
            SessionCommand::Lock(i) => controller.toggle_lock(i).is_some(),
            SessionCommand::Copy(i) => {
                controller.copy_color(i);
                false
            }
            SessionCommand::Share => {
                writeln!(output, "{}", controller.share_link())?;
                controller.share();
                false
            }
            SessionCommand::Save => {
                controller.save_current();
                false
            }
            SessionCommand::Saved => {
                if controller.saved().is_empty() {
                    writeln!(output, "No saved palettes.")?;
                }
                for (i, palette) in controller.saved().iter().enumerate() {
                    writeln!(output, "{:>3}  {}", i, render_strip(palette, ansi))?;
                }
                false
            }
            SessionCommand::Load(i) => controller.load_saved(i),
            SessionCommand::Delete(i) => {
                controller.delete_saved(i);
                false
            }
            SessionCommand::Help => {
                write!(output, "{}", HELP)?;
                false
            }
            SessionCommand::Quit => break,
        };

        if redraw {
            write!(output, "{}", render_palette(controller.palette(), Some(controller.locks()), ansi))?;
        }
    }

    output.flush()
}

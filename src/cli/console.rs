//! Console collaborators: notifications on stderr and the system clipboard

use log::{debug, error};

use crate::controller::{Clipboard, NoticeKind, Notifier};

/// Prints notifications to stderr, leaving stdout for data.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Success => eprintln!("✓ {}", message),
            NoticeKind::Info => eprintln!("· {}", message),
            NoticeKind::Error => eprintln!("Error: {}", message),
        }
    }
}

/// The desktop clipboard.
///
/// The handle is opened on the first copy and kept for the life of the
/// value, so text copied during a session stays owned while it runs.
/// Any failure to open or write is logged and reported as `false`.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once a clipboard handle has been opened.
    pub fn is_open(&self) -> bool {
        self.clipboard.is_some()
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> bool {
        if self.clipboard.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => {
                    error!("failed to access clipboard: {}", e);
                    return false;
                }
            }
        }
        let Some(clipboard) = self.clipboard.as_mut() else {
            return false;
        };
        match clipboard.set_text(text) {
            Ok(()) => {
                debug!("copied to clipboard: {}", text);
                true
            }
            Err(e) => {
                error!("failed to copy to clipboard: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_opens_lazily() {
        let clipboard = SystemClipboard::new();
        assert!(!clipboard.is_open());
    }
}

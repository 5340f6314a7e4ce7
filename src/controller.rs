//! Palette session state and user actions
//!
//! [`PaletteController`] owns everything a palette UI needs between actions:
//! the current palette, its lock mask and the saved list. Each method is one
//! user action. Side effects go through the [`Clipboard`] and [`Notifier`]
//! collaborators so any front end (or a test) can supply its own.

use log::{debug, warn};

use crate::palette::{generate, LockMask, Palette};
use crate::share::{decode, share_url};
use crate::store::PaletteStore;

pub const MSG_COLOR_LOCKED: &str = "Color locked";
pub const MSG_COLOR_UNLOCKED: &str = "Color unlocked";
pub const MSG_COPY_FAILED: &str = "Failed to copy";
pub const MSG_URL_COPIED: &str = "Palette URL copied!";
pub const MSG_URL_COPY_FAILED: &str = "Failed to copy URL";
pub const MSG_PALETTE_SAVED: &str = "Palette saved!";
pub const MSG_PALETTE_DUPLICATE: &str = "Palette already saved";
pub const MSG_PALETTE_INVALID: &str = "Palette has invalid colors and cannot be saved";
pub const MSG_PALETTE_DELETED: &str = "Palette deleted";
pub const MSG_PALETTE_LOADED: &str = "Palette loaded!";

/// Classification of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Receives user-facing notifications. Fire-and-forget.
pub trait Notifier {
    fn notify(&mut self, message: &str, kind: NoticeKind);
}

/// Writes text to a clipboard, reporting whether it worked.
pub trait Clipboard {
    fn copy(&mut self, text: &str) -> bool;
}

/// A notification as recorded by [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

/// Notifier that keeps every notification in order.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub notices: Vec<Notice>,
}

impl RecordingNotifier {
    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str, kind: NoticeKind) {
        self.notices.push(Notice { message: message.to_string(), kind });
    }
}

/// Clipboard that keeps copied text in memory, optionally refusing writes.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    pub copied: Vec<String>,
    pub deny: bool,
}

impl MemoryClipboard {
    /// A clipboard whose every write is denied.
    pub fn denied() -> Self {
        Self { copied: Vec::new(), deny: true }
    }

    pub fn last(&self) -> Option<&str> {
        self.copied.last().map(String::as_str)
    }
}

impl Clipboard for MemoryClipboard {
    fn copy(&mut self, text: &str) -> bool {
        if self.deny {
            return false;
        }
        self.copied.push(text.to_string());
        true
    }
}

/// Where the initial palette came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteSource {
    /// Decoded from a share link
    SharedLink,
    /// Generated because there was no usable link
    Random,
}

/// A key press routed to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Char(char),
    Other,
}

/// What currently holds input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Nothing focused (the page body)
    None,
    /// A button, text field or other control
    Control,
}

/// Owns the palette session and dispatches user actions.
pub struct PaletteController<C, N> {
    palette: Palette,
    locks: LockMask,
    saved: Vec<Palette>,
    store: PaletteStore,
    share_base: String,
    clipboard: C,
    notifier: N,
}

impl<C: Clipboard, N: Notifier> PaletteController<C, N> {
    /// Create a controller, loading the saved list from `store`.
    ///
    /// Starts with a random palette; call [`initialize`](Self::initialize)
    /// to honor a share link.
    pub fn new(store: PaletteStore, share_base: impl Into<String>, clipboard: C, notifier: N) -> Self {
        let saved = store.load();
        Self {
            palette: Palette::random(),
            locks: LockMask::new(),
            saved,
            store,
            share_base: share_base.into(),
            clipboard,
            notifier,
        }
    }

    /// Pick the initial palette from a `colors` parameter, falling back to random.
    pub fn initialize(&mut self, colors_param: Option<&str>) -> PaletteSource {
        match decode(colors_param) {
            Some(palette) => {
                debug!("initial palette from share link: {:?}", palette);
                self.palette = palette;
                PaletteSource::SharedLink
            }
            None => {
                if colors_param.is_some_and(|p| !p.is_empty()) {
                    warn!("ignoring malformed colors parameter {:?}", colors_param);
                }
                self.palette = Palette::random();
                PaletteSource::Random
            }
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn locks(&self) -> &LockMask {
        &self.locks
    }

    pub fn saved(&self) -> &[Palette] {
        &self.saved
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Share link for the current palette.
    pub fn share_link(&self) -> String {
        share_url(&self.share_base, &self.palette)
    }

    /// Regenerate unlocked slots.
    pub fn generate(&mut self) {
        self.palette = generate(&self.locks, &self.palette);
        debug!("generated palette with {} locked slot(s)", self.locks.locked_count());
    }

    /// Flip the lock on one slot. Returns the new state.
    pub fn toggle_lock(&mut self, index: usize) -> Option<bool> {
        match self.locks.toggle(index) {
            Some(locked) => {
                let message = if locked { MSG_COLOR_LOCKED } else { MSG_COLOR_UNLOCKED };
                self.notifier.notify(message, NoticeKind::Success);
                Some(locked)
            }
            None => {
                self.notifier.notify(&format!("No color at position {}", index), NoticeKind::Error);
                None
            }
        }
    }

    /// Copy one color code to the clipboard.
    pub fn copy_color(&mut self, index: usize) -> bool {
        let Some(color) = self.palette.get(index) else {
            self.notifier.notify(&format!("No color at position {}", index), NoticeKind::Error);
            return false;
        };
        let color = color.to_string();
        if self.clipboard.copy(&color) {
            self.notifier.notify(&format!("Copied {}", color), NoticeKind::Success);
            true
        } else {
            warn!("clipboard refused color {}", color);
            self.notifier.notify(MSG_COPY_FAILED, NoticeKind::Error);
            false
        }
    }

    /// Copy the share link for the current palette.
    pub fn share(&mut self) -> bool {
        let link = self.share_link();
        if self.clipboard.copy(&link) {
            self.notifier.notify(MSG_URL_COPIED, NoticeKind::Success);
            true
        } else {
            warn!("clipboard refused share link");
            self.notifier.notify(MSG_URL_COPY_FAILED, NoticeKind::Error);
            false
        }
    }

    /// Save the current palette. Returns false if it was already saved.
    ///
    /// A palette holding malformed colors (from a bad share link) is refused,
    /// since the saved list only loads when every entry is well-formed.
    pub fn save_current(&mut self) -> bool {
        if !self.palette.is_valid() {
            self.notifier.notify(MSG_PALETTE_INVALID, NoticeKind::Error);
            return false;
        }
        let list = std::mem::take(&mut self.saved);
        let result = self.store.append(self.palette.clone(), list);
        self.saved = result.list;
        if result.appended {
            self.notifier.notify(MSG_PALETTE_SAVED, NoticeKind::Success);
        } else {
            self.notifier.notify(MSG_PALETTE_DUPLICATE, NoticeKind::Info);
        }
        result.appended
    }

    /// Delete a saved palette.
    pub fn delete_saved(&mut self, index: usize) -> bool {
        match self.store.remove(index, &self.saved) {
            Ok(list) => {
                self.saved = list;
                self.notifier.notify(MSG_PALETTE_DELETED, NoticeKind::Success);
                true
            }
            Err(e) => {
                self.notifier.notify(&e.to_string(), NoticeKind::Error);
                false
            }
        }
    }

    /// Make a saved palette current and unlock every slot.
    pub fn load_saved(&mut self, index: usize) -> bool {
        match self.saved.get(index) {
            Some(palette) => {
                self.palette = palette.clone();
                self.locks.reset();
                self.notifier.notify(MSG_PALETTE_LOADED, NoticeKind::Success);
                true
            }
            None => {
                self.notifier
                    .notify(&format!("No saved palette at position {}", index), NoticeKind::Error);
                false
            }
        }
    }

    /// Keyboard shortcut: space with nothing focused regenerates.
    ///
    /// Returns true if the key was handled.
    pub fn handle_key(&mut self, key: Key, focus: Focus) -> bool {
        if key == Key::Space && focus == Focus::None {
            self.generate();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::store::MemorySlot;

    type TestController = PaletteController<MemoryClipboard, RecordingNotifier>;

    const LINK: &str = "ff0000,00ff00,0000ff,ffffff,000000";

    fn controller() -> TestController {
        PaletteController::new(
            PaletteStore::in_memory(),
            "https://example.com",
            MemoryClipboard::default(),
            RecordingNotifier::default(),
        )
    }

    #[test]
    fn test_initialize_from_link() {
        let mut c = controller();
        assert_eq!(c.initialize(Some(LINK)), PaletteSource::SharedLink);
        assert_eq!(c.palette()[0], Color::from_raw("#ff0000"));
    }

    #[test]
    fn test_initialize_falls_back_to_random() {
        let mut c = controller();
        assert_eq!(c.initialize(None), PaletteSource::Random);
        assert_eq!(c.initialize(Some("aa,bb")), PaletteSource::Random);
        assert!(c.palette().is_valid());
    }

    #[test]
    fn test_toggle_lock_notifies() {
        let mut c = controller();
        assert_eq!(c.toggle_lock(1), Some(true));
        assert_eq!(c.notifier().last().unwrap().message, MSG_COLOR_LOCKED);
        assert_eq!(c.toggle_lock(1), Some(false));
        assert_eq!(c.notifier().last().unwrap().message, MSG_COLOR_UNLOCKED);
        assert_eq!(c.toggle_lock(7), None);
        assert_eq!(c.notifier().last().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn test_copy_color() {
        let mut c = controller();
        c.initialize(Some(LINK));
        assert!(c.copy_color(2));
        assert_eq!(c.clipboard().last(), Some("#0000ff"));
        assert_eq!(c.notifier().last().unwrap().message, "Copied #0000ff");
    }

    #[test]
    fn test_copy_denied() {
        let mut c = PaletteController::new(
            PaletteStore::in_memory(),
            "https://example.com",
            MemoryClipboard::denied(),
            RecordingNotifier::default(),
        );
        assert!(!c.copy_color(0));
        assert_eq!(
            c.notifier().last(),
            Some(&Notice { message: MSG_COPY_FAILED.to_string(), kind: NoticeKind::Error })
        );
        assert!(!c.share());
        assert_eq!(c.notifier().last().unwrap().message, MSG_URL_COPY_FAILED);
    }

    #[test]
    fn test_share_copies_link() {
        let mut c = controller();
        c.initialize(Some(LINK));
        assert!(c.share());
        assert_eq!(c.clipboard().last(), Some("https://example.com/?colors=ff0000,00ff00,0000ff,ffffff,000000"));
        assert_eq!(c.notifier().last().unwrap().message, MSG_URL_COPIED);
    }

    #[test]
    fn test_load_saved_resets_locks() {
        let mut c = controller();
        c.initialize(Some(LINK));
        c.save_current();
        c.generate();
        c.toggle_lock(0);
        c.toggle_lock(3);
        assert!(c.load_saved(0));
        assert_eq!(c.locks(), &LockMask::new());
        assert_eq!(c.palette()[4], Color::from_raw("#000000"));
        assert_eq!(c.notifier().last().unwrap().message, MSG_PALETTE_LOADED);
        assert!(!c.load_saved(5));
    }

    #[test]
    fn test_save_refuses_malformed_palette() {
        let mut c = controller();
        assert_eq!(c.initialize(Some("zz,ff0000,00ff00,0000ff,ffffff")), PaletteSource::SharedLink);
        assert!(!c.save_current());
        assert!(c.saved().is_empty());
        assert_eq!(c.notifier().last().unwrap().message, MSG_PALETTE_INVALID);
    }

    #[test]
    fn test_delete_saved() {
        let mut c = controller();
        c.save_current();
        assert!(c.delete_saved(0));
        assert!(c.saved().is_empty());
        assert!(!c.delete_saved(0));
        assert_eq!(c.notifier().last().unwrap().kind, NoticeKind::Error);
    }

    #[test]
    fn test_handle_key() {
        let mut c = controller();
        c.initialize(Some(LINK));
        let before = c.palette().clone();

        assert!(!c.handle_key(Key::Space, Focus::Control));
        assert!(!c.handle_key(Key::Char('g'), Focus::None));
        assert!(!c.handle_key(Key::Other, Focus::None));
        assert_eq!(c.palette(), &before);

        assert!(c.handle_key(Key::Space, Focus::None));
        assert_ne!(c.palette(), &before);
    }

    #[test]
    fn test_saved_list_loaded_on_new() {
        let saved = vec![decode(Some(LINK)).unwrap()];
        let slot = MemorySlot::with_contents(serde_json::to_string(&saved).unwrap());
        let c = PaletteController::new(
            PaletteStore::new(slot),
            "https://example.com",
            MemoryClipboard::default(),
            RecordingNotifier::default(),
        );
        assert_eq!(c.saved().len(), 1);
    }
}

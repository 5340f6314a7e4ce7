//! Saved-palette persistence
//!
//! All saved palettes live in one key-value slot as a JSON array of string
//! arrays:
//!
//! ```json
//! [["#aabbcc", "#112233", "#445566", "#778899", "#ddeeff"]]
//! ```
//!
//! [`PaletteStore::load`] and [`PaletteStore::save`] never fail: a missing,
//! unreadable or malformed slot loads as an empty list, and a failed write is
//! logged and otherwise ignored. The fallible variants (`try_load`,
//! `try_save`) are available for callers that want the error.

use log::{debug, error, warn};
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

use crate::color::Color;
use crate::palette::{Palette, PALETTE_SIZE};

/// Default name of the storage slot
pub const DEFAULT_STORAGE_KEY: &str = "savedPalettes";

/// Error type for storage operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Reading or writing the slot failed
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),
    /// Slot contents are not valid JSON, or could not be serialized
    #[error("invalid saved palette JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// JSON parsed but is not a list of palettes
    #[error("unexpected saved palette shape: {0}")]
    Shape(String),
    /// Index passed to `remove` does not exist
    #[error("no saved palette at index {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A single named key-value slot holding a string.
pub trait StorageSlot {
    /// Name of the slot, used in log messages
    fn name(&self) -> &str;

    /// Current contents, or `None` if the slot has never been written.
    fn read(&self) -> io::Result<Option<String>>;

    /// Replace the contents of the slot.
    fn write(&mut self, contents: &str) -> io::Result<()>;
}

/// A slot backed by one JSON file.
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
    name: String,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageSlot for FileSlot {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        // Create parent directories if they don't exist
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, contents)
    }
}

/// An in-memory slot.
///
/// Clones share the same contents, so a test can keep a handle and inspect
/// what the store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    contents: Rc<RefCell<Option<String>>>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that starts out holding `contents`.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        let slot = Self::new();
        *slot.contents.borrow_mut() = Some(contents.into());
        slot
    }

    /// Make every read fail, like an unavailable storage backend.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make every write fail, like an exceeded storage quota.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Snapshot of the current contents.
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl StorageSlot for MemorySlot {
    fn name(&self) -> &str {
        "memory"
    }

    fn read(&self) -> io::Result<Option<String>> {
        if self.fail_reads {
            return Err(io::Error::other("storage unavailable"));
        }
        Ok(self.contents.borrow().clone())
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::other("storage quota exceeded"));
        }
        *self.contents.borrow_mut() = Some(contents.to_string());
        Ok(())
    }
}

/// Outcome of [`PaletteStore::append`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appended {
    pub list: Vec<Palette>,
    /// False when the candidate was already saved
    pub appended: bool,
}

/// Loads and saves the list of saved palettes through a [`StorageSlot`].
pub struct PaletteStore {
    slot: Box<dyn StorageSlot>,
}

impl PaletteStore {
    pub fn new(slot: impl StorageSlot + 'static) -> Self {
        Self { slot: Box::new(slot) }
    }

    /// Store backed by a JSON file at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(FileSlot::new(path))
    }

    /// Store that only lives for this process.
    pub fn in_memory() -> Self {
        Self::new(MemorySlot::new())
    }

    pub fn slot_name(&self) -> &str {
        self.slot.name()
    }

    /// Read the saved list, treating any failure as an empty list.
    pub fn load(&self) -> Vec<Palette> {
        match self.try_load() {
            Ok(list) => {
                debug!("loaded {} saved palette(s) from {}", list.len(), self.slot.name());
                list
            }
            Err(e) => {
                warn!("failed to load saved palettes from {}: {}", self.slot.name(), e);
                Vec::new()
            }
        }
    }

    pub fn try_load(&self) -> Result<Vec<Palette>, StoreError> {
        match self.slot.read()? {
            Some(contents) => parse_saved(&contents),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite the slot with `list`. Failures are logged, not returned.
    pub fn save(&mut self, list: &[Palette]) {
        match self.try_save(list) {
            Ok(()) => debug!("saved {} palette(s) to {}", list.len(), self.slot.name()),
            Err(e) => error!("failed to save palettes to {}: {}", self.slot.name(), e),
        }
    }

    pub fn try_save(&mut self, list: &[Palette]) -> Result<(), StoreError> {
        let json = serialize_saved(list)?;
        self.slot.write(&json)?;
        Ok(())
    }

    /// Append `candidate` and persist, unless an identical palette is already saved.
    pub fn append(&mut self, candidate: Palette, mut list: Vec<Palette>) -> Appended {
        if is_duplicate(&candidate, &list) {
            return Appended { list, appended: false };
        }
        list.push(candidate);
        self.save(&list);
        Appended { list, appended: true }
    }

    /// Remove the palette at `index` and persist the shorter list.
    pub fn remove(&mut self, index: usize, list: &[Palette]) -> Result<Vec<Palette>, StoreError> {
        if index >= list.len() {
            return Err(StoreError::IndexOutOfRange { index, len: list.len() });
        }
        let mut updated = list.to_vec();
        updated.remove(index);
        self.save(&updated);
        Ok(updated)
    }
}

/// True if `list` holds a palette with the same colors in the same order.
pub fn is_duplicate(candidate: &Palette, list: &[Palette]) -> bool {
    list.iter().any(|saved| saved == candidate)
}

/// Parse slot contents, accepting only a list of well-formed palettes.
pub fn parse_saved(json: &str) -> Result<Vec<Palette>, StoreError> {
    let raw: Vec<Vec<String>> = serde_json::from_str(json)?;
    raw.into_iter()
        .enumerate()
        .map(|(i, entry)| {
            if entry.len() != PALETTE_SIZE {
                return Err(StoreError::Shape(format!(
                    "entry {} has {} colors, expected {}",
                    i,
                    entry.len(),
                    PALETTE_SIZE
                )));
            }
            let colors: Vec<Color> = entry.into_iter().map(Color::from_raw).collect();
            if let Some(bad) = colors.iter().find(|c| !c.is_valid()) {
                return Err(StoreError::Shape(format!("entry {} has invalid color '{}'", i, bad)));
            }
            Palette::try_from(colors).map_err(|_| StoreError::Shape(format!("entry {}", i)))
        })
        .collect()
}

/// Serialize a list of palettes to the slot format.
pub fn serialize_saved(list: &[Palette]) -> Result<String, StoreError> {
    Ok(serde_json::to_string(list)?)
}

//! End-to-end palette session tests
//!
//! Drives a `PaletteController` the way a UI would: start from empty storage,
//! generate, lock, regenerate, save, and reload from the same slot.

use huebox::cli::session::run_session_io;
use huebox::color::Color;
use huebox::controller::{
    MemoryClipboard, NoticeKind, PaletteController, PaletteSource, RecordingNotifier,
    MSG_PALETTE_DUPLICATE, MSG_PALETTE_SAVED,
};
use huebox::palette::PALETTE_SIZE;
use huebox::share::{decode, encode};
use huebox::store::{parse_saved, MemorySlot, PaletteStore};
use std::io::Cursor;
use tempfile::TempDir;

type TestController = PaletteController<MemoryClipboard, RecordingNotifier>;

fn controller_with(store: PaletteStore) -> TestController {
    PaletteController::new(
        store,
        "https://example.com",
        MemoryClipboard::default(),
        RecordingNotifier::default(),
    )
}

// ============================================================================
// Lock / regenerate / save scenario
// ============================================================================

#[test]
fn test_lock_generate_save_scenario() {
    let slot = MemorySlot::new();
    let mut c = controller_with(PaletteStore::new(slot.clone()));

    assert_eq!(c.initialize(None), PaletteSource::Random);
    assert!(c.saved().is_empty());
    let first = c.palette().clone();
    assert!(first.is_valid());

    c.toggle_lock(2);
    c.generate();
    let second = c.palette().clone();

    assert_eq!(second[2], first[2], "locked slot must not change");
    for i in (0..PALETTE_SIZE).filter(|&i| i != 2) {
        assert_ne!(second[i], first[i], "unlocked slot {} should change", i);
    }

    assert!(c.save_current());
    assert_eq!(c.saved().len(), 1);
    assert_eq!(c.notifier().last().unwrap().message, MSG_PALETTE_SAVED);
    assert_eq!(parse_saved(&slot.contents().unwrap()).unwrap().len(), 1);

    assert!(!c.save_current());
    assert_eq!(c.saved().len(), 1);
    let last = c.notifier().last().unwrap();
    assert_eq!(last.message, MSG_PALETTE_DUPLICATE);
    assert_eq!(last.kind, NoticeKind::Info);
    assert_eq!(parse_saved(&slot.contents().unwrap()).unwrap().len(), 1);
}

#[test]
fn test_saved_palettes_survive_restart() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("savedPalettes.json");

    let mut c = controller_with(PaletteStore::open(&path));
    c.initialize(Some("ff0000,00ff00,0000ff,ffffff,000000"));
    c.save_current();
    c.generate();
    c.save_current();
    let expected = c.saved().to_vec();
    drop(c);

    let restarted = controller_with(PaletteStore::open(&path));
    assert_eq!(restarted.saved(), expected.as_slice());
    assert_eq!(restarted.saved()[0][0], Color::from_raw("#ff0000"));
}

#[test]
fn test_corrupt_storage_starts_empty_and_is_overwritten() {
    let slot = MemorySlot::with_contents("{\"not\": \"a list\"}");
    let mut c = controller_with(PaletteStore::new(slot.clone()));
    assert!(c.saved().is_empty());

    c.save_current();
    assert_eq!(parse_saved(&slot.contents().unwrap()).unwrap().len(), 1);
}

#[test]
fn test_failed_writes_keep_session_state() {
    let mut c = controller_with(PaletteStore::new(MemorySlot::new().failing_writes()));
    assert!(c.save_current());
    assert_eq!(c.saved().len(), 1);
    assert!(c.delete_saved(0));
    assert!(c.saved().is_empty());
}

#[test]
fn test_share_link_reconstructs_palette() {
    let mut sender = controller_with(PaletteStore::in_memory());
    sender.share();
    let link = sender.clipboard().last().unwrap().to_string();

    let param = huebox::share::colors_param(&link).unwrap().into_owned();
    let mut receiver = controller_with(PaletteStore::in_memory());
    assert_eq!(receiver.initialize(Some(param.as_str())), PaletteSource::SharedLink);
    assert_eq!(receiver.palette(), sender.palette());
    assert_eq!(decode(Some(encode(sender.palette()).as_str())).as_ref(), Some(sender.palette()));
}

// ============================================================================
// Line-based session
// ============================================================================

#[test]
fn test_session_lock_save_and_list() {
    let mut c = controller_with(PaletteStore::in_memory());
    c.initialize(Some("ff0000,00ff00,0000ff,ffffff,000000"));

    let input = Cursor::new("lock 0\n\nsave\nsave\nsaved\nbogus\nquit\ngenerate\n");
    let mut output = Vec::new();
    run_session_io(&mut c, input, &mut output, false).unwrap();
    let text = String::from_utf8(output).unwrap();

    assert_eq!(c.palette()[0], Color::from_raw("#ff0000"), "locked slot kept across Enter");
    assert_eq!(c.saved().len(), 1, "second save is a duplicate");
    assert!(text.contains("[locked]"));
    assert!(text.contains("  0   #FF0000 "), "saved list shows the palette: {}", text);
    assert!(text.contains("unknown command 'bogus'"));

    let messages: Vec<&str> = c.notifier().notices.iter().map(|n| n.message.as_str()).collect();
    assert_eq!(messages, vec!["Color locked", MSG_PALETTE_SAVED, MSG_PALETTE_DUPLICATE]);
}

#[test]
fn test_session_load_resets_locks() {
    let mut c = controller_with(PaletteStore::in_memory());
    c.initialize(Some("ff0000,00ff00,0000ff,ffffff,000000"));

    let input = Cursor::new("save\nlock 1\ngenerate\nload 0\n");
    run_session_io(&mut c, input, std::io::sink(), false).unwrap();

    assert_eq!(c.locks().locked_count(), 0);
    assert_eq!(encode(c.palette()), "ff0000,00ff00,0000ff,ffffff,000000");
}

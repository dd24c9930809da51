//! Script selection persisted across sessions.

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use tempfile::TempDir;

use lipi::{FileStore, PreferenceStore, STORAGE_KEY, Script, TransliterationContext};

#[test]
fn test_choice_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prefs").join("preferences.json");

    let mut first = TransliterationContext::new(FileStore::new(&path));
    first.hydrate();
    assert_eq!(first.target_script(), Script::Devanagari);
    first.set_target_script("TELUGU");
    drop(first);

    let mut second = TransliterationContext::new(FileStore::new(&path));
    assert_eq!(second.transliterate_text("राम"), "राम");
    second.hydrate();
    assert_eq!(second.target_script(), Script::Telugu);
    assert_ne!(second.transliterate_text("राम"), "राम");
}

#[test]
fn test_stored_value_is_the_script_id() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");

    let mut ctx = TransliterationContext::new(FileStore::new(&path));
    ctx.hydrate();
    ctx.set_target_script("IAST");

    let store = FileStore::new(&path);
    assert_eq!(store.get(STORAGE_KEY).unwrap().as_deref(), Some("IAST"));
}

#[test]
fn test_corrupt_value_falls_back_to_devanagari() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    fs::write(&path, format!(r#"{{"{STORAGE_KEY}": "ROT13"}}"#)).unwrap();

    let mut ctx = TransliterationContext::new(FileStore::new(&path));
    ctx.hydrate();
    assert!(ctx.is_hydrated());
    assert_eq!(ctx.target_script(), Script::Devanagari);
}

#[test]
fn test_unreadable_file_falls_back_to_devanagari() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.json");
    fs::write(&path, "not json").unwrap();

    let mut ctx = TransliterationContext::new(FileStore::new(&path));
    ctx.hydrate();
    assert_eq!(ctx.target_script(), Script::Devanagari);
}

#[test]
fn test_subscribers_follow_changes() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut ctx = TransliterationContext::default();
    ctx.hydrate();

    let sink = Rc::clone(&seen);
    let id = ctx.subscribe(move |script| sink.borrow_mut().push(script));

    ctx.set_target_script("KANNADA");
    ctx.set_target_script("not-a-script");
    ctx.set_target_script("HK");
    assert!(ctx.unsubscribe(id));
    ctx.set_target_script("SLP1");

    assert_eq!(*seen.borrow(), [Script::Kannada, Script::Hk]);
    assert_eq!(ctx.target_script(), Script::Slp1);
}

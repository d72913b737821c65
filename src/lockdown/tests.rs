use super::{FLAG_BINDINGS, LockdownFlag, LockdownFlags, LockdownManager};
use crate::{keyfile::KeyFile, reload::ConfigTarget};

fn flags_from(contents: &str) -> LockdownFlags {
    LockdownFlags::from_key_file(&KeyFile::parse(contents).unwrap())
}

#[test]
fn locked_key_disables_capability() {
    let flags = flags_from("[Lockdown]\nPrinting=true\n");

    assert!(flags.exposed(LockdownFlag::Printing));
    assert!(!flags.printing);
    assert!(!flags.exposed(LockdownFlag::SaveToDisk));
    assert!(flags.save_to_disk);
}

#[test]
fn privacy_group_is_read() {
    let flags = flags_from("[Privacy]\nCamera=true\nMicrophone=false\nSoundOutput=1\n");

    assert!(flags.exposed(LockdownFlag::Camera));
    assert!(!flags.exposed(LockdownFlag::Microphone));
    assert!(flags.exposed(LockdownFlag::SoundOutput));
    assert!(!flags.exposed(LockdownFlag::Location));
}

#[test]
fn keys_in_wrong_group_are_ignored() {
    let flags = flags_from("[Privacy]\nPrinting=true\n[Lockdown]\nCamera=true\n");

    assert_eq!(flags, LockdownFlags::default());
}

#[test]
fn invalid_values_are_not_locked() {
    let flags = flags_from("[Lockdown]\nLocation=sometimes\n");

    assert!(!flags.exposed(LockdownFlag::Location));
}

#[test]
fn bindings_cover_every_property_once() {
    let mut properties: Vec<_> = FLAG_BINDINGS.iter().map(|b| b.property).collect();
    properties.sort_unstable();
    properties.dedup();

    assert_eq!(properties.len(), 7);
    for binding in &FLAG_BINDINGS {
        assert_eq!(binding.flag.binding(), binding);
        assert!(binding.property.starts_with("disable-"));
    }
}

#[test]
fn nothing_is_disabled_before_any_load() {
    let manager = LockdownManager::new();

    for binding in &FLAG_BINDINGS {
        assert!(!manager.is_disabled(binding.flag));
    }
}

#[tokio::test]
async fn initial_load_is_silent() {
    let manager = LockdownManager::new();
    let rx = manager.subscribe();

    manager.apply(&KeyFile::parse("[Lockdown]\nPrinting=true\n").unwrap(), false);

    assert!(!rx.has_changed().unwrap());
    assert!(manager.is_disabled(LockdownFlag::Printing));
}

#[tokio::test]
async fn reload_wakes_subscribers_only_on_change() {
    let manager = LockdownManager::new();
    let contents = KeyFile::parse("[Lockdown]\nSaveToDisk=true\n").unwrap();
    manager.apply(&contents, false);
    let mut rx = manager.subscribe();

    manager.apply(&contents, true);
    assert!(!rx.has_changed().unwrap());

    let before = *rx.borrow_and_update();
    manager.apply(&KeyFile::parse("[Privacy]\nCamera=true\n").unwrap(), true);
    assert!(rx.has_changed().unwrap());

    let after = *rx.borrow_and_update();
    assert_eq!(
        after.changed_from(&before),
        vec![LockdownFlag::SaveToDisk, LockdownFlag::Camera]
    );
}

#[test]
fn bus_writes_flow_back_inverted() {
    let manager = LockdownManager::new();

    assert!(manager.set_disabled(LockdownFlag::Microphone, true));
    assert!(!manager.flags().microphone);
    assert!(manager.is_disabled(LockdownFlag::Microphone));

    assert!(!manager.set_disabled(LockdownFlag::Microphone, true));
}

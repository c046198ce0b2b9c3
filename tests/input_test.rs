//! Input system tests
//!
//! Key bindings, pad editing, and the modal settings flow, driven through
//! the handler stack the way the main loop drives it.

mod common;

use common::{voice, EngineCall, MockEngine};
use speakpad::input::{create_default_keymap, DefaultKeyHandler, HandlerStack, KeyAction};
use speakpad::player::Player;

fn stack() -> HandlerStack {
    let mut handlers = HandlerStack::new();
    handlers.push(Box::new(DefaultKeyHandler::new(create_default_keymap())));
    handlers
}

#[test]
fn test_keymap_creation() {
    let keymap = create_default_keymap();

    assert_eq!(keymap.get(&b"\x1bp".to_vec()), Some(&KeyAction::Play));
    assert_eq!(keymap.get(&b"\x1ba".to_vec()), Some(&KeyAction::Pause));
    assert_eq!(keymap.get(&b"\x1br".to_vec()), Some(&KeyAction::Resume));
    assert_eq!(keymap.get(&b"\x1bs".to_vec()), Some(&KeyAction::Stop));

    assert_eq!(keymap.get(&b"\x1bv".to_vec()), Some(&KeyAction::NextVoice));
    assert_eq!(keymap.get(&b"\x1bV".to_vec()), Some(&KeyAction::PrevVoice));

    assert_eq!(keymap.get(&b"\x1b.".to_vec()), Some(&KeyAction::RateUp));
    assert_eq!(keymap.get(&b"\x1b,".to_vec()), Some(&KeyAction::RateDown));
    assert_eq!(keymap.get(&b"\x1b>".to_vec()), Some(&KeyAction::PitchUp));
    assert_eq!(keymap.get(&b"\x1b<".to_vec()), Some(&KeyAction::PitchDown));

    assert_eq!(keymap.get(&b"\x1bc".to_vec()), Some(&KeyAction::Settings));
    assert_eq!(keymap.get(&b"\x1bq".to_vec()), Some(&KeyAction::Quit));
}

#[test]
fn test_typing_edits_the_pad() {
    let mut player = Player::new(None);
    let mut handlers = stack();

    handlers.process(b"hi", &mut player).unwrap();
    assert_eq!(player.text(), "hi");

    handlers.process(b"\r", &mut player).unwrap();
    handlers.process(b"there", &mut player).unwrap();
    assert_eq!(player.text(), "hi\nthere");

    handlers.process(b"\x7f", &mut player).unwrap();
    assert_eq!(player.text(), "hi\nther");

    // ctrl+u clears the pad
    handlers.process(b"\x15", &mut player).unwrap();
    assert_eq!(player.text(), "");
}

#[test]
fn test_unbound_chords_do_not_edit_the_pad() {
    let mut player = Player::new(None);
    let mut handlers = stack();

    handlers.process(b"\x1bz", &mut player).unwrap();
    handlers.process(b"\x1b[A", &mut player).unwrap();
    assert_eq!(player.text(), "");
}

#[test]
fn test_play_binding_submits() {
    let (engine, handles) = MockEngine::new(Vec::new());
    let mut player = Player::new(Some(Box::new(engine)));
    let mut handlers = stack();

    handlers.process(b"Hello", &mut player).unwrap();
    handlers.process(b"\x1bp", &mut player).unwrap();

    assert!(matches!(handles.calls()[0], EngineCall::Submit(_)));
}

#[test]
fn test_rate_and_pitch_nudges() {
    let mut player = Player::new(None);
    let mut handlers = stack();

    handlers.process(b"\x1b.", &mut player).unwrap();
    assert!((player.rate() - 1.01).abs() < 1e-4);

    handlers.process(b"\x1b,", &mut player).unwrap();
    handlers.process(b"\x1b,", &mut player).unwrap();
    assert!((player.rate() - 0.99).abs() < 1e-4);

    handlers.process(b"\x1b<", &mut player).unwrap();
    assert!((player.pitch() - 0.99).abs() < 1e-4);
}

#[test]
fn test_voice_cycling() {
    let (engine, _handles) = MockEngine::new(vec![
        voice("alpha", "en-US"),
        voice("bravo", "de-DE"),
    ]);
    let mut player = Player::new(Some(Box::new(engine)));
    let mut handlers = stack();

    // default selection lands on the English voice
    assert_eq!(player.catalog().selected_name(), Some("alpha"));

    handlers.process(b"\x1bv", &mut player).unwrap();
    assert_eq!(player.catalog().selected_name(), Some("bravo"));

    handlers.process(b"\x1bV", &mut player).unwrap();
    assert_eq!(player.catalog().selected_name(), Some("alpha"));
}

#[test]
fn test_quit_binding_exits() {
    let mut player = Player::new(None);
    let mut handlers = stack();

    assert!(!handlers.process(b"x", &mut player).unwrap());
    assert!(handlers.process(b"\x1bq", &mut player).unwrap());
}

#[test]
fn test_settings_menu_rate_entry() {
    let mut player = Player::new(None);
    let mut handlers = stack();

    handlers.process(b"\x1bc", &mut player).unwrap();
    assert_eq!(handlers.len(), 2);

    handlers.process(b"r", &mut player).unwrap();
    assert_eq!(handlers.len(), 3);

    handlers.process(b"1", &mut player).unwrap();
    handlers.process(b".", &mut player).unwrap();
    handlers.process(b"5", &mut player).unwrap();
    handlers.process(b"\r", &mut player).unwrap();

    assert_eq!(handlers.len(), 2);
    assert_eq!(player.rate(), 1.5);

    // Enter leaves the menu
    handlers.process(b"\r", &mut player).unwrap();
    assert_eq!(handlers.len(), 1);
}

#[test]
fn test_settings_menu_clamps_typed_rate() {
    let mut player = Player::new(None);
    let mut handlers = stack();

    handlers.process(b"\x1bc", &mut player).unwrap();
    handlers.process(b"r", &mut player).unwrap();
    handlers.process(b"9", &mut player).unwrap();
    handlers.process(b"\r", &mut player).unwrap();

    assert_eq!(player.rate(), 2.0);
}

#[test]
fn test_settings_menu_rejects_garbage() {
    let mut player = Player::new(None);
    let mut handlers = stack();

    handlers.process(b"\x1bc", &mut player).unwrap();
    handlers.process(b"p", &mut player).unwrap();
    handlers.process(b"abc", &mut player).unwrap();
    handlers.process(b"\r", &mut player).unwrap();

    assert_eq!(player.pitch(), 1.0);
    assert_eq!(player.status(), "invalid");
}

#[test]
fn test_settings_menu_voice_by_number() {
    let (engine, _handles) = MockEngine::new(vec![
        voice("alpha", "en-US"),
        voice("bravo", "de-DE"),
    ]);
    let mut player = Player::new(Some(Box::new(engine)));
    let mut handlers = stack();

    handlers.process(b"\x1bc", &mut player).unwrap();
    handlers.process(b"v", &mut player).unwrap();
    handlers.process(b"2", &mut player).unwrap();
    handlers.process(b"\r", &mut player).unwrap();

    assert_eq!(player.catalog().selected_name(), Some("bravo"));
}

#[test]
fn test_buffer_prompt_can_be_canceled() {
    let mut player = Player::new(None);
    let mut handlers = stack();

    handlers.process(b"\x1bc", &mut player).unwrap();
    handlers.process(b"r", &mut player).unwrap();
    handlers.process(b"1", &mut player).unwrap();
    handlers.process(b"\x1b", &mut player).unwrap();

    assert_eq!(handlers.len(), 2);
    assert_eq!(player.rate(), 1.0);
}

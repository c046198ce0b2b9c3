//! Default key bindings for speakpad

use std::collections::HashMap;

/// Key sequence type
pub type KeySequence = Vec<u8>;

/// Action identifier for key bindings
///
/// Each variant is a form action that can be triggered by a key chord
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Playback
    Play,
    Pause,
    Resume,
    Stop,

    // Voice selection
    NextVoice,
    PrevVoice,

    // Rate and pitch nudges
    RateUp,
    RateDown,
    PitchUp,
    PitchDown,

    // Pad editing
    ClearText,

    // Modes
    Settings,
    Quit,
}

/// Create the default keymap
///
/// Alt chords arrive as ESC-prefixed byte pairs in raw mode. ESC-[ is left
/// unbound: it introduces CSI sequences (arrow keys and friends).
pub fn create_default_keymap() -> HashMap<KeySequence, KeyAction> {
    let mut map = HashMap::new();

    // Playback (alt+p/a/r/s)
    map.insert(b"\x1bp".to_vec(), KeyAction::Play);
    map.insert(b"\x1ba".to_vec(), KeyAction::Pause);
    map.insert(b"\x1br".to_vec(), KeyAction::Resume);
    map.insert(b"\x1bs".to_vec(), KeyAction::Stop);

    // Voice selection (alt+v / alt+V)
    map.insert(b"\x1bv".to_vec(), KeyAction::NextVoice);
    map.insert(b"\x1bV".to_vec(), KeyAction::PrevVoice);

    // Rate (alt+. / alt+,) and pitch (alt+> / alt+<)
    map.insert(b"\x1b.".to_vec(), KeyAction::RateUp);
    map.insert(b"\x1b,".to_vec(), KeyAction::RateDown);
    map.insert(b"\x1b>".to_vec(), KeyAction::PitchUp);
    map.insert(b"\x1b<".to_vec(), KeyAction::PitchDown);

    // Pad editing (ctrl+u)
    map.insert(b"\x15".to_vec(), KeyAction::ClearText);

    // Modes (alt+c settings, alt+q quit)
    map.insert(b"\x1bc".to_vec(), KeyAction::Settings);
    map.insert(b"\x1bq".to_vec(), KeyAction::Quit);

    map
}

//! Default key handler for the pad
//!
//! Processes alt+key chords for playback and form actions; everything
//! unbound edits the text field.

use super::settings_handler::SettingsHandler;
use super::{HandlerAction, KeyAction, KeyHandler};
use crate::player::Player;
use crate::speech::PARAM_STEP;
use crate::Result;
use log::{debug, trace};
use std::collections::HashMap;

/// Base handler mapping key chords to form actions
pub struct DefaultKeyHandler {
    /// Key bindings map
    keymap: HashMap<Vec<u8>, KeyAction>,
}

impl DefaultKeyHandler {
    /// Create a new default key handler
    pub fn new(keymap: HashMap<Vec<u8>, KeyAction>) -> Self {
        debug!("Creating default key handler with {} bindings", keymap.len());
        Self { keymap }
    }

    /// Execute a form action
    fn execute_action(&mut self, action: KeyAction, player: &mut Player) -> Result<HandlerAction> {
        match action {
            KeyAction::Play => player.speak()?,
            KeyAction::Pause => player.pause()?,
            KeyAction::Resume => player.resume()?,
            KeyAction::Stop => player.stop()?,

            KeyAction::NextVoice => player.select_next_voice(),
            KeyAction::PrevVoice => player.select_prev_voice(),

            KeyAction::RateUp => player.nudge_rate(PARAM_STEP),
            KeyAction::RateDown => player.nudge_rate(-PARAM_STEP),
            KeyAction::PitchUp => player.nudge_pitch(PARAM_STEP),
            KeyAction::PitchDown => player.nudge_pitch(-PARAM_STEP),

            KeyAction::ClearText => player.clear_text(),

            KeyAction::Settings => {
                return Ok(HandlerAction::Push(Box::new(SettingsHandler::new(player))));
            }
            KeyAction::Quit => return Ok(HandlerAction::Exit),
        }

        Ok(HandlerAction::Handled)
    }
}

impl KeyHandler for DefaultKeyHandler {
    fn process(&mut self, key: &[u8], player: &mut Player) -> Result<HandlerAction> {
        if let Some(action) = self.keymap.get(key).copied() {
            trace!("Key action: {:?}", action);
            return self.execute_action(action, player);
        }

        // Unbound input edits the pad
        match key {
            b"\r" | b"\n" => player.push_char('\n'),
            b"\x08" | b"\x7f" => player.backspace(),
            _ => {
                // Unrecognized chords and control bytes are dropped; plain
                // text (including pastes arriving as one chunk) goes into
                // the pad
                if !key.starts_with(b"\x1b") {
                    if let Ok(s) = std::str::from_utf8(key) {
                        if !s.chars().any(char::is_control) {
                            player.push_str(s);
                        }
                    }
                }
            }
        }

        Ok(HandlerAction::Handled)
    }
}

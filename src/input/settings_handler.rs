//! Settings menu handler
//!
//! Modal handler for the pad's settings menu (alt+c). Lets the user type
//! exact values instead of nudging: rate, pitch, or a voice picked by its
//! number in the catalog. Accepted values are clamped to the supported
//! range and written back to the config file.

use super::buffer_handler::BufferHandler;
use super::{HandlerAction, KeyHandler};
use crate::player::Player;
use crate::Result;
use log::debug;

const MENU: &str = "settings: r rate, p pitch, v voice number, enter done";

/// Settings menu key handler
///
/// - r: type an exact rate
/// - p: type an exact pitch
/// - v: pick a voice by catalog number
/// - Enter: leave the menu
pub struct SettingsHandler;

impl SettingsHandler {
    /// Create a new settings handler and announce the menu
    pub fn new(player: &mut Player) -> Self {
        player.set_status(MENU);
        Self
    }

    /// Set speech rate from typed input
    fn set_rate(input: String, player: &mut Player) -> Result<()> {
        match input.trim().parse::<f32>() {
            Ok(rate) => {
                debug!("Settings: rate {}", rate);
                player.set_rate(rate);
                player.persist_settings();
            }
            Err(_) => {
                debug!("Settings: invalid rate '{}'", input);
                player.set_status("invalid");
            }
        }
        Ok(())
    }

    /// Set speech pitch from typed input
    fn set_pitch(input: String, player: &mut Player) -> Result<()> {
        match input.trim().parse::<f32>() {
            Ok(pitch) => {
                debug!("Settings: pitch {}", pitch);
                player.set_pitch(pitch);
                player.persist_settings();
            }
            Err(_) => {
                debug!("Settings: invalid pitch '{}'", input);
                player.set_status("invalid");
            }
        }
        Ok(())
    }

    /// Select a voice by its number in the catalog (1-based, as shown in
    /// the voice list)
    fn set_voice(input: String, player: &mut Player) -> Result<()> {
        let index = input.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1));
        match index {
            Some(index) if player.select_voice_index(index) => {
                debug!("Settings: voice {}", index);
                let status = match player.catalog().selected() {
                    Some(voice) => format!("voice {} ({})", voice.name, voice.language),
                    None => "voice selected".to_string(),
                };
                player.set_status(status);
                player.persist_settings();
            }
            _ => {
                debug!("Settings: invalid voice '{}'", input);
                player.set_status("invalid");
            }
        }
        Ok(())
    }
}

impl KeyHandler for SettingsHandler {
    fn process(&mut self, key: &[u8], player: &mut Player) -> Result<HandlerAction> {
        match key {
            b"r" => {
                debug!("Settings: rate prompt");
                let handler = BufferHandler::new("rate (0.5 - 2.0): ", player, Box::new(Self::set_rate));
                Ok(HandlerAction::Push(Box::new(handler)))
            }

            b"p" => {
                debug!("Settings: pitch prompt");
                let handler =
                    BufferHandler::new("pitch (0.5 - 2.0): ", player, Box::new(Self::set_pitch));
                Ok(HandlerAction::Push(Box::new(handler)))
            }

            b"v" => {
                debug!("Settings: voice prompt");
                let handler =
                    BufferHandler::new("voice number: ", player, Box::new(Self::set_voice));
                Ok(HandlerAction::Push(Box::new(handler)))
            }

            // Enter or escape - leave the menu
            b"\r" | b"\n" | b"\x1b" => {
                debug!("Settings: exit");
                player.set_status("");
                Ok(HandlerAction::Remove)
            }

            // Unknown key - repeat the menu
            _ => {
                player.set_status(MENU);
                Ok(HandlerAction::Handled)
            }
        }
    }
}

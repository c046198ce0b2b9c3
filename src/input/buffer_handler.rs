//! Buffer handler for collecting a line of input
//!
//! Used when the pad needs a typed value (e.g. an exact rate in the
//! settings menu). The prompt and the collected text are mirrored into the
//! status line; Enter accepts, escape cancels.

use super::{HandlerAction, KeyHandler};
use crate::player::Player;
use crate::Result;
use log::debug;

/// Callback function type for when input is complete
type OnAcceptFn = Box<dyn FnOnce(String, &mut Player) -> Result<()> + Send>;

/// Handler that collects text input until Enter is pressed
pub struct BufferHandler {
    /// Prompt shown ahead of the collected input
    prompt: String,

    /// Accumulated input buffer
    buffer: String,

    /// Callback to execute when Enter is pressed
    on_accept: Option<OnAcceptFn>,
}

impl BufferHandler {
    /// Create a new buffer handler
    ///
    /// The callback is invoked with the collected text when the user
    /// presses Enter.
    pub fn new(prompt: &str, player: &mut Player, on_accept: OnAcceptFn) -> Self {
        player.set_status(prompt.to_string());
        Self {
            prompt: prompt.to_string(),
            buffer: String::new(),
            on_accept: Some(on_accept),
        }
    }

    fn show(&self, player: &mut Player) {
        player.set_status(format!("{}{}", self.prompt, self.buffer));
    }
}

impl KeyHandler for BufferHandler {
    fn process(&mut self, key: &[u8], player: &mut Player) -> Result<HandlerAction> {
        match key {
            // Enter - accept input and invoke callback
            b"\r" | b"\n" => {
                debug!("BufferHandler: accepting input '{}'", self.buffer);

                if let Some(callback) = self.on_accept.take() {
                    callback(self.buffer.clone(), player)?;
                }

                Ok(HandlerAction::Remove)
            }

            // Escape - cancel without invoking the callback
            b"\x1b" => {
                debug!("BufferHandler: canceled");
                player.set_status("");
                Ok(HandlerAction::Remove)
            }

            // Backspace - remove last character
            b"\x08" | b"\x7f" => {
                if !self.buffer.is_empty() {
                    self.buffer.pop();
                }
                self.show(player);
                Ok(HandlerAction::Handled)
            }

            // Regular character - add to buffer
            _ => {
                if !key.starts_with(b"\x1b") {
                    if let Ok(s) = std::str::from_utf8(key) {
                        if !s.chars().any(char::is_control) {
                            self.buffer.push_str(s);
                        }
                    }
                }
                self.show(player);
                Ok(HandlerAction::Handled)
            }
        }
    }
}

//! Key handler system with modal input support

use crate::player::Player;
use crate::Result;

/// Action to take after processing a key
pub enum HandlerAction {
    /// Key was handled, do nothing more
    Handled,
    /// Push a nested handler on top of this one (e.g. a value prompt
    /// spawned from the settings menu)
    Push(Box<dyn KeyHandler>),
    /// Remove this handler from the stack
    Remove,
    /// Exit the application
    Exit,
}

/// A key handler processes keyboard input against the player state
pub trait KeyHandler {
    /// Process a key sequence
    fn process(&mut self, key: &[u8], player: &mut Player) -> Result<HandlerAction>;
}

/// Stack of key handlers (the top handler sees input first)
pub struct HandlerStack {
    handlers: Vec<Box<dyn KeyHandler>>,
}

impl HandlerStack {
    /// Create a new handler stack
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Push a handler onto the stack
    pub fn push(&mut self, handler: Box<dyn KeyHandler>) {
        self.handlers.push(handler);
    }

    /// Pop the top handler from the stack
    pub fn pop(&mut self) -> Option<Box<dyn KeyHandler>> {
        self.handlers.pop()
    }

    /// Process a key with the top handler
    ///
    /// Returns true when the application should exit. Push and Remove are
    /// resolved here; the bottom handler never removes itself.
    pub fn process(&mut self, key: &[u8], player: &mut Player) -> Result<bool> {
        let Some(handler) = self.handlers.last_mut() else {
            return Ok(false);
        };

        match handler.process(key, player)? {
            HandlerAction::Handled => {}
            HandlerAction::Push(nested) => self.handlers.push(nested),
            HandlerAction::Remove => {
                self.handlers.pop();
            }
            HandlerAction::Exit => return Ok(true),
        }

        Ok(false)
    }

    /// Get the number of handlers in the stack
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if the stack is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerStack {
    fn default() -> Self {
        Self::new()
    }
}

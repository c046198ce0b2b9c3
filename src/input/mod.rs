//! Input handling and key bindings
//!
//! The input system uses a stack-based handler architecture: the default
//! handler edits the pad and runs playback actions, while modal handlers
//! (settings menu, value prompts) are pushed on top and intercept keys
//! until they remove themselves.

pub mod buffer_handler;
pub mod default_handler;
pub mod handler;
pub mod keymap;
pub mod settings_handler;

pub use buffer_handler::BufferHandler;
pub use default_handler::DefaultKeyHandler;
pub use handler::{HandlerAction, HandlerStack, KeyHandler};
pub use keymap::{create_default_keymap, KeyAction};
pub use settings_handler::SettingsHandler;

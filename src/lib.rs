//! speakpad - an interactive terminal text-to-speech pad
//!
//! Type text into the pad, pick a voice, tune rate and pitch, and have the
//! platform speech synthesizer read it back. Playback is coordinated by a
//! small event-driven state machine; the actual synthesis is delegated
//! entirely to the operating system's speech facility.

pub mod catalog;
pub mod config;
pub mod error;
pub mod input;
pub mod player;
pub mod speech;
pub mod terminal;
pub mod ui;

pub use error::{Result, SpeakpadError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "speakpad";

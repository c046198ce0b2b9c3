//! Playback controller
//!
//! The Player is the central state record for the pad: text, rate, pitch,
//! voice catalog, playback state and the current session handle all live
//! here, away from any rendering. User actions and engine events both feed
//! into it; every transition is keyed on the session handle so late events
//! for a replaced or stopped session cannot regress state.

use crate::catalog::VoiceCatalog;
use crate::config::Config;
use crate::speech::{clamp_param, EngineEvent, SessionHandle, SpeechEngine, Utterance};
use crate::Result;
use log::{debug, info, warn};

/// Playback states
///
/// Speaking means the engine has confirmed the current session started and
/// has not yet reported its end. A freshly submitted session stays Idle
/// until that confirmation arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Idle,
    Speaking,
    Paused,
}

/// Central controller for the pad
pub struct Player {
    /// Engine capability; None when the platform has no synthesizer, in
    /// which case every playback action is a silent no-op
    engine: Option<Box<dyn SpeechEngine>>,

    /// Voice snapshot and selection
    catalog: VoiceCatalog,

    /// The pad contents (may span multiple lines)
    text: String,

    /// Rate multiplier, kept in [0.5, 2.0] by the controls
    rate: f32,

    /// Pitch multiplier, kept in [0.5, 2.0] by the controls
    pitch: f32,

    playback: Playback,

    /// Handle of the session most recently submitted and not yet ended,
    /// errored or stopped
    session: Option<SessionHandle>,

    /// Transient message for the status line
    status: String,

    /// Config for persisting settings changes; absent in tests and when
    /// the config file could not be loaded
    config: Option<Config>,
}

impl Player {
    /// Create a player around an engine capability
    ///
    /// Queries the initial voice list right away when an engine is present;
    /// later changes arrive as [`EngineEvent::VoicesChanged`].
    pub fn new(engine: Option<Box<dyn SpeechEngine>>) -> Self {
        if engine.is_none() {
            info!("No speech engine; playback actions will be ignored");
        }

        let mut player = Self {
            engine,
            catalog: VoiceCatalog::new(),
            text: String::new(),
            rate: 1.0,
            pitch: 1.0,
            playback: Playback::Idle,
            session: None,
            status: String::new(),
            config: None,
        };
        player.refresh_voices();
        player
    }

    /// Apply startup defaults and keep the config for later saves
    pub fn attach_config(&mut self, config: Config) {
        self.rate = config.rate();
        self.pitch = config.pitch();
        if let Some(voice) = config.voice() {
            debug!("Preselecting configured voice '{}'", voice);
            self.catalog.preselect(&voice);
        }
        self.config = Some(config);
    }

    /// Write the current rate, pitch and voice back to the config file
    pub fn persist_settings(&mut self) {
        let selected = self.catalog.selected_name().map(str::to_owned);
        if let Some(config) = self.config.as_mut() {
            config.set("speech", "rate", &format!("{:.2}", self.rate));
            config.set("speech", "pitch", &format!("{:.2}", self.pitch));
            config.set("speech", "voice", selected.as_deref().unwrap_or(""));
            if let Err(e) = config.save() {
                warn!("Failed to save config: {}", e);
            }
        }
    }

    // ========== Pad text ==========

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn push_char(&mut self, ch: char) {
        self.text.push(ch);
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear_text(&mut self) {
        self.text.clear();
        self.set_status("text cleared");
    }

    /// Whether the Speak action is available: the pad must contain
    /// something besides whitespace
    pub fn can_speak(&self) -> bool {
        !self.text.trim().is_empty()
    }

    // ========== Rate and pitch ==========

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = clamp_param(rate);
        self.set_status(format!("rate {:.2}", self.rate));
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = clamp_param(pitch);
        self.set_status(format!("pitch {:.2}", self.pitch));
    }

    pub fn nudge_rate(&mut self, delta: f32) {
        self.set_rate(self.rate + delta);
    }

    pub fn nudge_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    // ========== Voices ==========

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    /// Query the engine's current voice list and replace the catalog
    ///
    /// Query failures keep the previous snapshot; a missing engine keeps
    /// the catalog empty.
    pub fn refresh_voices(&mut self) {
        let Some(engine) = self.engine.as_ref() else {
            return;
        };

        match engine.voices() {
            Ok(voices) => self.catalog.replace(voices),
            Err(e) => warn!("Voice list query failed: {}", e),
        }
    }

    pub fn select_next_voice(&mut self) {
        if let Some(voice) = self.catalog.select_next() {
            let status = format!("voice {} ({})", voice.name, voice.language);
            self.set_status(status);
        } else {
            self.set_status("no voices available");
        }
    }

    pub fn select_prev_voice(&mut self) {
        if let Some(voice) = self.catalog.select_prev() {
            let status = format!("voice {} ({})", voice.name, voice.language);
            self.set_status(status);
        } else {
            self.set_status("no voices available");
        }
    }

    /// Select a voice by its position in the catalog; false when the index
    /// is out of range
    pub fn select_voice_index(&mut self, index: usize) -> bool {
        self.catalog.select_index(index)
    }

    // ========== Playback actions ==========

    /// Submit the pad contents to the engine
    ///
    /// Any active session is canceled first: the platform plays a single
    /// utterance at a time, so Speak always replaces, never queues. The
    /// state flips to Speaking only once the engine confirms the start.
    pub fn speak(&mut self) -> Result<()> {
        if !self.can_speak() {
            return Ok(());
        }

        let Some(engine) = self.engine.as_mut() else {
            debug!("Speak ignored: no speech engine");
            return Ok(());
        };

        if let Some(old) = self.session.take() {
            engine.cancel(old)?;
        }
        self.playback = Playback::Idle;

        let utterance = Utterance {
            text: self.text.clone(),
            rate: self.rate,
            pitch: self.pitch,
            voice: self.catalog.selected_name().map(str::to_owned),
        };

        let session = engine.submit(&utterance)?;
        debug!("Submitted session {:?}", session);
        self.session = Some(session);
        self.set_status("");

        Ok(())
    }

    /// Ask the engine to pause; only meaningful while Speaking
    pub fn pause(&mut self) -> Result<()> {
        if self.playback != Playback::Speaking {
            return Ok(());
        }

        if let (Some(engine), Some(session)) = (self.engine.as_mut(), self.session) {
            engine.pause(session)?;
            self.playback = Playback::Paused;
        }

        Ok(())
    }

    /// Ask the engine to resume; only meaningful while Paused
    pub fn resume(&mut self) -> Result<()> {
        if self.playback != Playback::Paused {
            return Ok(());
        }

        if let (Some(engine), Some(session)) = (self.engine.as_mut(), self.session) {
            engine.resume(session)?;
            self.playback = Playback::Speaking;
        }

        Ok(())
    }

    /// Cancel whatever is active and return to Idle
    pub fn stop(&mut self) -> Result<()> {
        if let Some(engine) = self.engine.as_mut() {
            if let Some(session) = self.session.take() {
                engine.cancel(session)?;
            }
        }

        self.session = None;
        self.playback = Playback::Idle;

        Ok(())
    }

    // ========== Engine events ==========

    /// Feed one engine event into the state machine
    ///
    /// Events tagged with a handle other than the current session belong to
    /// an utterance that was replaced or stopped; they are dropped without
    /// touching state.
    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::VoicesChanged => self.refresh_voices(),
            EngineEvent::Started(handle) if self.session == Some(handle) => {
                debug!("Session {:?} started", handle);
                self.playback = Playback::Speaking;
            }
            EngineEvent::Ended(handle) if self.session == Some(handle) => {
                debug!("Session {:?} ended", handle);
                self.playback = Playback::Idle;
                self.session = None;
            }
            EngineEvent::Errored(handle) if self.session == Some(handle) => {
                // Failure is absorbed exactly like completion; no error
                // surfaces beyond the return to Idle
                warn!("Session {:?} failed", handle);
                self.playback = Playback::Idle;
                self.session = None;
            }
            other => debug!("Ignoring stale engine event {:?}", other),
        }
    }

    // ========== UI support ==========

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

//! Speech engine abstraction
//!
//! The pad never synthesizes audio itself. Everything below is a thin,
//! typed boundary over the platform's speech facility: submit an utterance,
//! receive lifecycle events, cancel when asked. Backends translate this
//! contract onto whatever the operating system provides.

use crate::{Result, SpeakpadError};
use log::info;
use std::sync::mpsc::Sender;

/// Lower bound for the rate and pitch multipliers
pub const PARAM_MIN: f32 = 0.5;
/// Upper bound for the rate and pitch multipliers
pub const PARAM_MAX: f32 = 2.0;
/// Step used by the rate and pitch nudge keys
pub const PARAM_STEP: f32 = 0.01;

/// Clamp a rate or pitch multiplier to the supported range
pub fn clamp_param(value: f32) -> f32 {
    value.clamp(PARAM_MIN, PARAM_MAX)
}

/// A selectable synthesis voice as reported by the engine
///
/// `name` is a display identifier, not guaranteed unique across
/// installations. `language` is a BCP-47-like tag. The platform's own voice
/// object stays inside the backend; it is resolved back from the name at
/// submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    pub name: String,
    pub language: String,
}

/// One synthesis job: text plus the parameters it should be spoken with
///
/// Built fresh for every speak action and never mutated after submission.
/// `rate` and `pitch` are multipliers of the engine's normal value; the
/// input controls keep them inside [`PARAM_MIN`, `PARAM_MAX`].
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub rate: f32,
    pub pitch: f32,
    /// Catalog voice name; `None` leaves the engine's default in place
    pub voice: Option<String>,
}

/// Identity of one in-flight utterance
///
/// Engine events carry the handle they belong to, so a late callback for a
/// session that was replaced or stopped can be recognized and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionHandle(pub u64);

/// Engine lifecycle notifications delivered into the main loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// The engine began playing the session's audio
    Started(SessionHandle),
    /// The session finished naturally
    Ended(SessionHandle),
    /// Synthesis failed mid-utterance
    Errored(SessionHandle),
    /// The engine's voice set changed; query the full list again
    VoicesChanged,
}

/// Speech engine trait
///
/// All backends implement this to expose the platform synthesizer. Calls
/// never block on audio; start, end and error are reported later as
/// [`EngineEvent`]s sent over the channel supplied at construction. At most
/// one of `Ended`/`Errored` fires per session.
pub trait SpeechEngine: Send {
    /// Snapshot of the voices the engine currently exposes
    fn voices(&self) -> Result<Vec<Voice>>;

    /// Submit an utterance for playback and return its session handle
    ///
    /// The platform plays a single utterance at a time; callers cancel the
    /// previous session before submitting a new one.
    fn submit(&mut self, utterance: &Utterance) -> Result<SessionHandle>;

    /// Pause the session; no-op if it is not currently playing
    fn pause(&mut self, session: SessionHandle) -> Result<()>;

    /// Resume the session; no-op if it is not paused
    fn resume(&mut self, session: SessionHandle) -> Result<()>;

    /// Cancel the session; no-op if it already ended
    fn cancel(&mut self, session: SessionHandle) -> Result<()>;
}

/// Create the platform speech engine
///
/// Lifecycle events are delivered through `events`. Returns an error when
/// the platform has no synthesis facility at all; the caller is expected to
/// keep running without an engine, with every playback action degrading to
/// a silent no-op.
pub fn create_engine(events: Sender<EngineEvent>) -> Result<Box<dyn SpeechEngine>> {
    use super::backends::native::NativeEngine;

    let platform = std::env::consts::OS;
    info!("Creating speech engine for platform: {}", platform);

    match NativeEngine::new(events) {
        Ok(engine) => {
            info!("Speech engine initialized");
            Ok(Box::new(engine))
        }
        Err(e) => Err(SpeakpadError::Speech(format!(
            "Failed to initialize speech engine for platform '{}': {}",
            platform, e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_param() {
        assert_eq!(clamp_param(1.0), 1.0);
        assert_eq!(clamp_param(0.4), PARAM_MIN);
        assert_eq!(clamp_param(2.5), PARAM_MAX);
        assert_eq!(clamp_param(PARAM_MIN), PARAM_MIN);
        assert_eq!(clamp_param(PARAM_MAX), PARAM_MAX);
    }

    #[test]
    fn test_session_handle_identity() {
        let a = SessionHandle(1);
        let b = SessionHandle(2);
        assert_ne!(a, b);
        assert_eq!(a, SessionHandle(1));
    }
}

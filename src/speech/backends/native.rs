//! Native speech engine backend using the tts crate
//!
//! The `tts` crate provides a unified interface to:
//! - Speech Dispatcher on Linux (via native bindings)
//! - AVFoundation on macOS/iOS
//! - WinRT on Windows
//!
//! Utterance begin/end callbacks fire on a platform thread; they only send
//! events over the channel, tagged with the session they belong to. All
//! state transitions happen on the main thread.

use crate::speech::engine::{EngineEvent, SessionHandle, SpeechEngine, Utterance, Voice};
use crate::{Result, SpeakpadError};
use log::{debug, warn};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use tts::{Tts, UtteranceId};

/// Slot tying the platform's utterance id to our session handle
///
/// The platform plays one utterance at a time, so a single slot is enough.
/// Callbacks check it to tag their events with the right session; a
/// callback whose id no longer matches belongs to a replaced utterance and
/// is dropped here.
type CurrentSlot = Arc<Mutex<Option<(UtteranceId, SessionHandle)>>>;

/// Speech engine backed by the operating system synthesizer
pub struct NativeEngine {
    tts: Tts,
    events: Sender<EngineEvent>,
    current: CurrentSlot,
    /// Monotonic counter; the highest value is the only cancelable session
    next_session: u64,
}

impl NativeEngine {
    /// Create the native engine and register utterance callbacks
    pub fn new(events: Sender<EngineEvent>) -> Result<Self> {
        debug!("Creating native speech engine");

        let mut tts = Tts::default()
            .map_err(|e| SpeakpadError::Speech(format!("Failed to initialize TTS: {}", e)))?;

        let current: CurrentSlot = Arc::new(Mutex::new(None));

        let features = tts.supported_features();
        if features.utterance_callbacks {
            let slot = Arc::clone(&current);
            let tx = events.clone();
            tts.on_utterance_begin(Some(Box::new(move |id: UtteranceId| {
                if let Ok(guard) = slot.lock() {
                    let session = match guard.as_ref() {
                        Some((current_id, session)) if *current_id == id => Some(*session),
                        _ => None,
                    };
                    if let Some(session) = session {
                        let _ = tx.send(EngineEvent::Started(session));
                    }
                }
            })))
            .map_err(|e| {
                SpeakpadError::Speech(format!("Failed to register begin callback: {}", e))
            })?;

            let slot = Arc::clone(&current);
            let tx = events.clone();
            tts.on_utterance_end(Some(Box::new(move |id: UtteranceId| {
                if let Ok(mut guard) = slot.lock() {
                    let session = match guard.as_ref() {
                        Some((current_id, session)) if *current_id == id => Some(*session),
                        _ => None,
                    };
                    if let Some(session) = session {
                        *guard = None;
                        let _ = tx.send(EngineEvent::Ended(session));
                    }
                }
            })))
            .map_err(|e| {
                SpeakpadError::Speech(format!("Failed to register end callback: {}", e))
            })?;

            // A stopped utterance was canceled from our side; the controller
            // already moved on, so only the slot needs releasing.
            let slot = Arc::clone(&current);
            tts.on_utterance_stop(Some(Box::new(move |id: UtteranceId| {
                if let Ok(mut guard) = slot.lock() {
                    let matches = matches!(guard.as_ref(), Some((current_id, _)) if *current_id == id);
                    if matches {
                        *guard = None;
                    }
                }
            })))
            .map_err(|e| {
                SpeakpadError::Speech(format!("Failed to register stop callback: {}", e))
            })?;
        } else {
            warn!("Utterance callbacks not supported on this platform");
        }

        // The platform offers no catalog-change notification of its own;
        // report the initial set once so it loads through the same path a
        // change would.
        let _ = events.send(EngineEvent::VoicesChanged);

        Ok(Self {
            tts,
            events,
            current,
            next_session: 0,
        })
    }

    /// Map a [0.5, 2.0] multiplier onto a platform parameter range
    ///
    /// 1.0 lands on the platform's normal value; the halves interpolate
    /// linearly down to the minimum and up to the maximum.
    fn scale(multiplier: f32, min: f32, normal: f32, max: f32) -> f32 {
        let scaled = if multiplier >= 1.0 {
            normal + (max - normal) * (multiplier - 1.0)
        } else {
            min + (normal - min) * ((multiplier - 0.5) / 0.5)
        };
        scaled.clamp(min.min(max), max.max(min))
    }

    fn apply_parameters(&mut self, utterance: &Utterance) -> Result<()> {
        let features = self.tts.supported_features();

        if features.rate {
            let rate = Self::scale(
                utterance.rate,
                self.tts.min_rate(),
                self.tts.normal_rate(),
                self.tts.max_rate(),
            );
            self.tts
                .set_rate(rate)
                .map_err(|e| SpeakpadError::Speech(format!("Failed to set rate: {}", e)))?;
        } else {
            warn!("Rate control not supported on this platform");
        }

        if features.pitch {
            let pitch = Self::scale(
                utterance.pitch,
                self.tts.min_pitch(),
                self.tts.normal_pitch(),
                self.tts.max_pitch(),
            );
            self.tts
                .set_pitch(pitch)
                .map_err(|e| SpeakpadError::Speech(format!("Failed to set pitch: {}", e)))?;
        } else {
            warn!("Pitch control not supported on this platform");
        }

        if let Some(ref name) = utterance.voice {
            if features.voice {
                let voices = self
                    .tts
                    .voices()
                    .map_err(|e| SpeakpadError::Speech(format!("Failed to get voices: {}", e)))?;
                match voices.iter().find(|v| v.name() == *name) {
                    Some(voice) => {
                        self.tts.set_voice(voice).map_err(|e| {
                            SpeakpadError::Speech(format!("Failed to set voice: {}", e))
                        })?;
                    }
                    None => {
                        warn!("Voice '{}' not reported by the engine, keeping default", name);
                    }
                }
            } else {
                warn!("Voice selection not supported on this platform");
            }
        }

        Ok(())
    }
}

impl SpeechEngine for NativeEngine {
    fn voices(&self) -> Result<Vec<Voice>> {
        let voices = self
            .tts
            .voices()
            .map_err(|e| SpeakpadError::Speech(format!("Failed to get voices: {}", e)))?;

        Ok(voices
            .iter()
            .map(|v| Voice {
                name: v.name(),
                language: v.language().to_string(),
            })
            .collect())
    }

    fn submit(&mut self, utterance: &Utterance) -> Result<SessionHandle> {
        self.apply_parameters(utterance)?;

        self.next_session += 1;
        let session = SessionHandle(self.next_session);

        debug!(
            "Submitting {} chars as session {:?}",
            utterance.text.len(),
            session
        );

        // interrupt=true also flushes anything still queued at the platform
        // level from a session canceled a moment ago
        let id = self
            .tts
            .speak(utterance.text.as_str(), true)
            .map_err(|e| SpeakpadError::Speech(format!("Speak failed: {}", e)))?;

        let callbacks = self.tts.supported_features().utterance_callbacks;
        match id {
            Some(id) if callbacks => {
                if let Ok(mut guard) = self.current.lock() {
                    *guard = Some((id, session));
                }
            }
            _ => {
                // No begin callback is coming; report the start ourselves so
                // playback state still advances. Completion cannot be
                // observed on such platforms.
                let _ = self.events.send(EngineEvent::Started(session));
            }
        }

        Ok(session)
    }

    fn pause(&mut self, _session: SessionHandle) -> Result<()> {
        // The tts crate exposes no pause control; the request is absorbed,
        // matching the contract that pause is a tolerant no-op.
        warn!("Pause not supported by this platform's synthesizer");
        Ok(())
    }

    fn resume(&mut self, _session: SessionHandle) -> Result<()> {
        warn!("Resume not supported by this platform's synthesizer");
        Ok(())
    }

    fn cancel(&mut self, session: SessionHandle) -> Result<()> {
        if session.0 != self.next_session {
            debug!("Ignoring cancel for stale session {:?}", session);
            return Ok(());
        }

        debug!("Canceling session {:?}", session);
        self.tts
            .stop()
            .map_err(|e| SpeakpadError::Speech(format!("Cancel failed: {}", e)))?;

        if let Ok(mut guard) = self.current.lock() {
            *guard = None;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_create_engine() {
        // May fail on systems without speech-dispatcher or in CI without
        // audio; either outcome is acceptable here.
        let (tx, _rx) = mpsc::channel();
        match NativeEngine::new(tx) {
            Ok(_) => println!("native engine initialized"),
            Err(e) => println!("engine unavailable (may be expected in CI): {}", e),
        }
    }

    #[test]
    fn test_scale_normal() {
        assert_eq!(NativeEngine::scale(1.0, 0.0, 50.0, 100.0), 50.0);
    }

    #[test]
    fn test_scale_extremes() {
        assert_eq!(NativeEngine::scale(2.0, 0.0, 50.0, 100.0), 100.0);
        assert_eq!(NativeEngine::scale(0.5, 0.0, 50.0, 100.0), 0.0);
    }

    #[test]
    fn test_scale_midpoints() {
        assert_eq!(NativeEngine::scale(1.5, 0.0, 50.0, 100.0), 75.0);
        assert_eq!(NativeEngine::scale(0.75, 0.0, 50.0, 100.0), 25.0);
    }

    #[test]
    fn test_scale_clamps_out_of_range() {
        assert_eq!(NativeEngine::scale(5.0, 0.0, 50.0, 100.0), 100.0);
        assert_eq!(NativeEngine::scale(0.0, 0.0, 50.0, 100.0), 0.0);
    }
}

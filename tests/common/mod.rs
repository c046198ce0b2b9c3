//! Shared test support: a scripted speech engine
//!
//! Records every call the controller makes and hands out sequential
//! session handles. Lifecycle events are delivered by the tests
//! themselves, straight into the player, so races and stale deliveries
//! can be scripted exactly.
#![allow(dead_code)]

use speakpad::speech::{SessionHandle, SpeechEngine, Utterance, Voice};
use speakpad::Result;
use std::sync::{Arc, Mutex};

/// One recorded engine call
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Submit(Utterance),
    Pause(SessionHandle),
    Resume(SessionHandle),
    Cancel(SessionHandle),
}

/// Shared view into the mock's state, kept by the test after the engine
/// itself moves into the player
pub struct MockHandles {
    pub voices: Arc<Mutex<Vec<Voice>>>,
    pub calls: Arc<Mutex<Vec<EngineCall>>>,
}

impl MockHandles {
    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_voices(&self, voices: Vec<Voice>) {
        *self.voices.lock().unwrap() = voices;
    }
}

pub struct MockEngine {
    voices: Arc<Mutex<Vec<Voice>>>,
    calls: Arc<Mutex<Vec<EngineCall>>>,
    next_session: u64,
}

impl MockEngine {
    pub fn new(voices: Vec<Voice>) -> (Self, MockHandles) {
        let voices = Arc::new(Mutex::new(voices));
        let calls = Arc::new(Mutex::new(Vec::new()));
        let engine = Self {
            voices: Arc::clone(&voices),
            calls: Arc::clone(&calls),
            next_session: 0,
        };
        (engine, MockHandles { voices, calls })
    }
}

impl SpeechEngine for MockEngine {
    fn voices(&self) -> Result<Vec<Voice>> {
        Ok(self.voices.lock().unwrap().clone())
    }

    fn submit(&mut self, utterance: &Utterance) -> Result<SessionHandle> {
        self.next_session += 1;
        self.calls
            .lock()
            .unwrap()
            .push(EngineCall::Submit(utterance.clone()));
        Ok(SessionHandle(self.next_session))
    }

    fn pause(&mut self, session: SessionHandle) -> Result<()> {
        self.calls.lock().unwrap().push(EngineCall::Pause(session));
        Ok(())
    }

    fn resume(&mut self, session: SessionHandle) -> Result<()> {
        self.calls.lock().unwrap().push(EngineCall::Resume(session));
        Ok(())
    }

    fn cancel(&mut self, session: SessionHandle) -> Result<()> {
        self.calls.lock().unwrap().push(EngineCall::Cancel(session));
        Ok(())
    }
}

pub fn voice(name: &str, language: &str) -> Voice {
    Voice {
        name: name.to_string(),
        language: language.to_string(),
    }
}

//! Speech engine integration

pub mod backends;
pub mod engine;

pub use engine::{
    clamp_param, create_engine, EngineEvent, SessionHandle, SpeechEngine, Utterance, Voice,
    PARAM_MAX, PARAM_MIN, PARAM_STEP,
};

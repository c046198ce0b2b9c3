//! Voice catalog
//!
//! Caches the set of voices the speech engine currently exposes and tracks
//! which one is selected. The engine signals catalog changes; every signal
//! replaces the cached list wholesale, no diffing.

use crate::speech::Voice;
use log::debug;

/// The selectable voice set and the current selection
///
/// A selection, once made, belongs to the user (or to their config) and is
/// never silently overridden by a refresh, even when the selected voice no
/// longer appears in the engine's list.
pub struct VoiceCatalog {
    voices: Vec<Voice>,
    selected: Option<String>,
}

impl VoiceCatalog {
    /// Create an empty catalog with nothing selected
    pub fn new() -> Self {
        Self {
            voices: Vec::new(),
            selected: None,
        }
    }

    /// Replace the cached list with a fresh engine snapshot
    ///
    /// The default-selection policy runs only while no voice has been
    /// chosen yet; after that, refreshes leave the selection alone.
    pub fn replace(&mut self, voices: Vec<Voice>) {
        debug!("Voice catalog refreshed: {} voices", voices.len());
        self.voices = voices;
        if self.selected.is_none() {
            self.selected = self.default_selection();
        }
    }

    /// Pick the initial voice: an Indonesian one first, then English, then
    /// whatever the engine lists first
    fn default_selection(&self) -> Option<String> {
        let by_prefix = |prefix: &str| {
            self.voices
                .iter()
                .find(|v| v.language.to_lowercase().starts_with(prefix))
        };

        by_prefix("id")
            .or_else(|| by_prefix("en"))
            .or_else(|| self.voices.first())
            .map(|v| v.name.clone())
    }

    /// All voices in the current snapshot
    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.voices.len()
    }

    /// Name of the selected voice, if any
    pub fn selected_name(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected voice's full descriptor, if it is present in the
    /// current snapshot
    pub fn selected(&self) -> Option<&Voice> {
        let name = self.selected.as_deref()?;
        self.voices.iter().find(|v| v.name == name)
    }

    /// Select a voice by name without checking the snapshot
    ///
    /// Used for a configured voice that may load before (or without) the
    /// engine reporting its list; it still counts as a made selection.
    pub fn preselect(&mut self, name: &str) {
        self.selected = Some(name.to_string());
    }

    /// Select a voice by position in the snapshot
    pub fn select_index(&mut self, index: usize) -> bool {
        match self.voices.get(index) {
            Some(voice) => {
                self.selected = Some(voice.name.clone());
                true
            }
            None => false,
        }
    }

    /// Move the selection to the next voice in the snapshot
    pub fn select_next(&mut self) -> Option<&Voice> {
        self.cycle(1)
    }

    /// Move the selection to the previous voice in the snapshot
    pub fn select_prev(&mut self) -> Option<&Voice> {
        self.cycle(-1)
    }

    fn cycle(&mut self, step: isize) -> Option<&Voice> {
        if self.voices.is_empty() {
            return None;
        }

        let len = self.voices.len() as isize;
        let current = self
            .selected
            .as_deref()
            .and_then(|name| self.voices.iter().position(|v| v.name == name));

        let next = match current {
            Some(i) => (i as isize + step).rem_euclid(len) as usize,
            // Selection absent or not in the snapshot: start from an edge
            None => {
                if step > 0 {
                    0
                } else {
                    self.voices.len() - 1
                }
            }
        };

        self.selected = Some(self.voices[next].name.clone());
        self.voices.get(next)
    }
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

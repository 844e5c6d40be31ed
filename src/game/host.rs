//! Host game interface
//!
//! The module never renders or plays sounds itself. It reports what changed
//! through a [`ModuleHost`], which the embedding game implements.

use crate::core::{ButtonIndex, Led, BUTTON_COUNT};

/// Callbacks a module invokes on the game hosting it
pub trait ModuleHost {
    /// The phrase on the display changed (empty once solved)
    fn display_text(&mut self, _text: &str) {}

    /// New labels were drawn for the buttons
    fn button_labels(&mut self, _labels: [u8; BUTTON_COUNT]) {}

    /// A button's status light changed
    fn button_led(&mut self, _index: ButtonIndex, _led: Led) {}

    /// The module was solved
    fn pass(&mut self);

    /// A wrong press was made
    fn strike(&mut self);
}

/// Everything a module reported to its host, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleEvent {
    DisplayText(String),
    ButtonLabels([u8; BUTTON_COUNT]),
    ButtonLed { index: ButtonIndex, led: Led },
    Solved,
    Strike,
}

/// Host that records every event, for tests and the text front-end
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    events: Vec<ModuleEvent>,
}

impl RecordingHost {
    /// Create a host with no recorded events
    pub fn new() -> Self {
        RecordingHost::default()
    }

    /// Get every event recorded so far
    pub fn events(&self) -> &[ModuleEvent] {
        &self.events
    }

    /// Remove and return the recorded events
    pub fn take_events(&mut self) -> Vec<ModuleEvent> {
        std::mem::take(&mut self.events)
    }

    /// Count strike events
    pub fn strikes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ModuleEvent::Strike))
            .count()
    }

    /// Check if the module reported a solve
    pub fn solved(&self) -> bool {
        self.events.iter().any(|e| matches!(e, ModuleEvent::Solved))
    }

    /// Most recent display text, if any was shown
    pub fn last_display_text(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|e| match e {
            ModuleEvent::DisplayText(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl ModuleHost for RecordingHost {
    fn display_text(&mut self, text: &str) {
        self.events.push(ModuleEvent::DisplayText(text.to_string()));
    }

    fn button_labels(&mut self, labels: [u8; BUTTON_COUNT]) {
        self.events.push(ModuleEvent::ButtonLabels(labels));
    }

    fn button_led(&mut self, index: ButtonIndex, led: Led) {
        self.events.push(ModuleEvent::ButtonLed { index, led });
    }

    fn pass(&mut self) {
        self.events.push(ModuleEvent::Solved);
    }

    fn strike(&mut self) {
        self.events.push(ModuleEvent::Strike);
    }
}

//! Core puzzle types

pub mod panel;
pub mod phrase;

pub use panel::{ButtonIndex, ButtonPanel, Led, BUTTON_COUNT};
pub use phrase::{PhraseEntry, RuleKey};

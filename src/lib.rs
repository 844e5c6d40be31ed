//! Insane Talk - phrase/button puzzle modules for a bomb-defusal game
//!
//! Each module shows a phrase and four numbered buttons. The phrase's rule key
//! decides which order the buttons must be pressed in. Two rule variants are
//! supported: ordered subsequence matching and candidate elimination.

pub mod command;
pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod rules;

pub use error::{Result, TalkError};

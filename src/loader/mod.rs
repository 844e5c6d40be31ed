//! Asset loaders
//!
//! Parsers for the JSON phrase assets the modules draw from

pub mod phrases;

pub use phrases::PhraseBook;

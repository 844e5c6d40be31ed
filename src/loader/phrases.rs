//! Phrase book loader
//!
//! Two JSON asset shapes are understood:
//!
//! - an object mapping a digit-string rule key to its phrase text:
//!   `{ "4721": "Press the buttons." }`
//! - a list of identifier entries:
//!   `[{ "steam_id": 741, "text": "Press the buttons." }]`

use crate::core::{PhraseEntry, RuleKey};
use crate::rules::RuleVariant;
use crate::{Result, TalkError};
use rand::Rng;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PhraseAsset {
    DigitMap(BTreeMap<String, String>),
    EntryList(Vec<IdEntry>),
}

#[derive(Debug, Deserialize)]
struct IdEntry {
    steam_id: i64,
    text: String,
}

impl PhraseAsset {
    fn into_entries(self) -> Vec<PhraseEntry> {
        match self {
            PhraseAsset::DigitMap(map) => map
                .into_iter()
                .map(|(digits, text)| PhraseEntry::with_digits(text, digits))
                .collect(),
            PhraseAsset::EntryList(list) => list
                .into_iter()
                .map(|e| PhraseEntry::with_id(e.text, e.steam_id))
                .collect(),
        }
    }
}

/// Read-only collection of phrases a module picks from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseBook {
    entries: Vec<PhraseEntry>,
    variant: RuleVariant,
}

impl PhraseBook {
    /// Build a book from ready-made entries
    ///
    /// The book's natural variant is `Elimination` when every key is a numeric
    /// identifier, `Subsequence` otherwise.
    pub fn from_entries(entries: Vec<PhraseEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(TalkError::EmptyPhraseBook);
        }
        let variant = if entries.iter().all(|e| matches!(e.rule_key, RuleKey::Id(_))) {
            RuleVariant::Elimination
        } else {
            RuleVariant::Subsequence
        };
        Ok(PhraseBook { entries, variant })
    }

    /// Parse either asset shape, detecting which one is present
    pub fn parse(contents: &str) -> Result<Self> {
        let asset: PhraseAsset = serde_json::from_str(contents).map_err(|e| {
            TalkError::InvalidAsset(format!(
                "expected a digit-key object or a list of {{steam_id, text}} entries: {e}"
            ))
        })?;

        Self::from_entries(asset.into_entries())
    }

    /// Load an asset from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load an asset from disk without blocking the runtime
    pub async fn load_async(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await?;
        Self::parse(&contents)
    }

    /// Get all entries in asset order
    pub fn entries(&self) -> &[PhraseEntry] {
        &self.entries
    }

    /// Variant implied by the asset shape
    pub fn variant(&self) -> RuleVariant {
        self.variant
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: empty books are rejected at construction
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct phrase texts
    pub fn distinct_texts(&self) -> usize {
        let mut texts: Vec<&str> = self.entries.iter().map(|e| e.text.as_str()).collect();
        texts.sort_unstable();
        texts.dedup();
        texts.len()
    }

    /// Pick an entry uniformly at random
    pub fn choose<R: Rng>(&self, rng: &mut R) -> &PhraseEntry {
        &self.entries[rng.gen_range(0..self.entries.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    #[test]
    fn test_parse_digit_map() {
        let book = PhraseBook::parse(r#"{"4721": "Press the buttons.", "90": "Nope."}"#).unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.variant(), RuleVariant::Subsequence);
        assert!(book
            .entries()
            .contains(&PhraseEntry::with_digits("Press the buttons.", "4721")));
    }

    #[test]
    fn test_parse_entry_list() {
        let book = PhraseBook::parse(
            r#"[{"steam_id": 741, "text": "Hello"}, {"steam_id": 852, "text": "Hello"}]"#,
        )
        .unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.distinct_texts(), 1);
        assert_eq!(book.variant(), RuleVariant::Elimination);
        assert_eq!(book.entries()[1], PhraseEntry::with_id("Hello", 852));
    }

    #[test]
    fn test_empty_asset_is_rejected() {
        assert!(matches!(PhraseBook::parse("{}"), Err(TalkError::EmptyPhraseBook)));
        assert!(matches!(PhraseBook::parse("[]"), Err(TalkError::EmptyPhraseBook)));
    }

    #[test]
    fn test_malformed_asset_is_rejected() {
        assert!(matches!(
            PhraseBook::parse("{\"1\": 5}"),
            Err(TalkError::InvalidAsset(_))
        ));
        assert!(matches!(
            PhraseBook::parse("[{\"text\": \"x\"}]"),
            Err(TalkError::InvalidAsset(_))
        ));
        assert!(matches!(
            PhraseBook::parse("\"just a phrase\""),
            Err(TalkError::InvalidAsset(_))
        ));
    }

    #[test]
    fn test_choose_is_deterministic_for_seed() {
        let book = PhraseBook::parse(r#"{"1": "a", "2": "b", "3": "c", "4": "d"}"#).unwrap();
        let mut rng1 = ChaCha12Rng::seed_from_u64(99);
        let mut rng2 = ChaCha12Rng::seed_from_u64(99);
        for _ in 0..20 {
            assert_eq!(book.choose(&mut rng1), book.choose(&mut rng2));
        }
    }
}

//! Phrases shown on the module display and the keys their rules derive from

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Identifier a phrase's press rule is derived from
///
/// Digit-string assets map a key such as `"4721"` directly to a phrase.
/// Identifier assets attach a numeric id to each phrase, and several ids may
/// share the same phrase text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleKey {
    Id(i64),
    Digits(String),
}

impl RuleKey {
    /// Decimal text of the key, used for digit lookups
    pub fn digits(&self) -> Cow<'_, str> {
        match self {
            RuleKey::Id(id) => Cow::Owned(id.to_string()),
            RuleKey::Digits(s) => Cow::Borrowed(s.as_str()),
        }
    }

    /// Whether the key counts as a positive identifier
    pub fn is_positive(&self) -> bool {
        match self {
            RuleKey::Id(id) => *id > 0,
            RuleKey::Digits(s) => {
                !s.starts_with('-') && s.bytes().any(|b| (b'1'..=b'9').contains(&b))
            }
        }
    }

    /// Position of the first occurrence of a digit in the key's decimal text
    pub fn position_of(&self, digit: u8) -> Option<usize> {
        let needle = char::from(b'0' + digit);
        self.digits().find(needle)
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKey::Id(id) => write!(f, "{id}"),
            RuleKey::Digits(s) => f.write_str(s),
        }
    }
}

/// A displayable phrase and the key its press rule comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseEntry {
    pub text: String,
    pub rule_key: RuleKey,
}

impl PhraseEntry {
    /// Create an entry with an explicit rule key
    pub fn new(text: impl Into<String>, rule_key: RuleKey) -> Self {
        PhraseEntry {
            text: text.into(),
            rule_key,
        }
    }

    /// Entry keyed by a digit string
    pub fn with_digits(text: impl Into<String>, digits: impl Into<String>) -> Self {
        PhraseEntry::new(text, RuleKey::Digits(digits.into()))
    }

    /// Entry keyed by a numeric identifier
    pub fn with_id(text: impl Into<String>, id: i64) -> Self {
        PhraseEntry::new(text, RuleKey::Id(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_of_uses_first_occurrence() {
        let key = RuleKey::Id(1213);
        assert_eq!(key.position_of(1), Some(0));
        assert_eq!(key.position_of(2), Some(1));
        assert_eq!(key.position_of(3), Some(3));
        assert_eq!(key.position_of(9), None);
    }

    #[test]
    fn test_negative_id_keeps_digits() {
        let key = RuleKey::Id(-42);
        assert_eq!(key.digits(), "-42");
        assert_eq!(key.position_of(4), Some(1));
        assert!(!key.is_positive());
    }

    #[test]
    fn test_is_positive() {
        assert!(RuleKey::Id(1).is_positive());
        assert!(!RuleKey::Id(0).is_positive());
        assert!(RuleKey::Digits("0071".to_string()).is_positive());
        assert!(!RuleKey::Digits("000".to_string()).is_positive());
    }
}

//! Press validation rules
//!
//! A rule judges each button press against the round's chosen phrase and
//! records the outcome on the button panel.

pub mod elimination;
pub mod subsequence;

pub use elimination::EliminationRule;
pub use subsequence::SubsequenceRule;

use crate::core::{ButtonIndex, ButtonPanel, PhraseEntry};
use serde::{Deserialize, Serialize};

/// Which validation semantics a module uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RuleVariant {
    /// Ordered subsequence of the rule key's digits (digit-string assets)
    #[default]
    Subsequence,
    /// Candidate elimination over identifiers sharing a phrase (id assets)
    Elimination,
}

/// Judgement of button presses for one round
pub trait PressRule {
    /// Judge a press of `pressed`, updating the panel's button states
    ///
    /// Returns true if the press was correct. A `pressed` index outside the
    /// panel is judged wrong and leaves the panel untouched.
    fn judge(&mut self, panel: &mut ButtonPanel, pressed: ButtonIndex) -> bool;

    /// Button presses that complete the round from its current state
    ///
    /// Returns `None` if no sequence of presses can complete it.
    fn solution(&self, panel: &ButtonPanel) -> Option<Vec<ButtonIndex>>;

    /// Human-readable summary for the module log
    fn describe(&self) -> String;
}

/// The rule chosen for the current round
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveRule {
    Subsequence(SubsequenceRule),
    Elimination(EliminationRule),
}

impl ActiveRule {
    /// Derive the rule for a freshly randomized panel
    pub fn derive(
        variant: RuleVariant,
        chosen: &PhraseEntry,
        entries: &[PhraseEntry],
        panel: &ButtonPanel,
    ) -> Self {
        match variant {
            RuleVariant::Subsequence => {
                ActiveRule::Subsequence(SubsequenceRule::new(&chosen.rule_key, panel))
            }
            RuleVariant::Elimination => {
                ActiveRule::Elimination(EliminationRule::new(chosen, entries))
            }
        }
    }

    /// Get the variant this rule implements
    pub fn variant(&self) -> RuleVariant {
        match self {
            ActiveRule::Subsequence(_) => RuleVariant::Subsequence,
            ActiveRule::Elimination(_) => RuleVariant::Elimination,
        }
    }
}

impl PressRule for ActiveRule {
    fn judge(&mut self, panel: &mut ButtonPanel, pressed: ButtonIndex) -> bool {
        match self {
            ActiveRule::Subsequence(rule) => rule.judge(panel, pressed),
            ActiveRule::Elimination(rule) => rule.judge(panel, pressed),
        }
    }

    fn solution(&self, panel: &ButtonPanel) -> Option<Vec<ButtonIndex>> {
        match self {
            ActiveRule::Subsequence(rule) => rule.solution(panel),
            ActiveRule::Elimination(rule) => rule.solution(panel),
        }
    }

    fn describe(&self) -> String {
        match self {
            ActiveRule::Subsequence(rule) => rule.describe(),
            ActiveRule::Elimination(rule) => rule.describe(),
        }
    }
}

//! Candidate elimination by relative digit position
//!
//! Every identifier sharing the displayed phrase starts as a candidate. A press
//! removes each candidate for which some still-unconfirmed button's label
//! appears earlier in the identifier than the pressed label (or appears while
//! the pressed label does not). A press that empties the candidate set is wrong.

use crate::core::{ButtonIndex, ButtonPanel, PhraseEntry, RuleKey, BUTTON_COUNT};
use crate::rules::PressRule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EliminationRule {
    candidates: Vec<RuleKey>,
    /// Elimination only applies when the displayed entry's key is positive
    eliminates: bool,
}

impl EliminationRule {
    /// Collect the distinct keys of every entry sharing the chosen phrase
    pub fn new(chosen: &PhraseEntry, entries: &[PhraseEntry]) -> Self {
        let mut candidates: Vec<RuleKey> = Vec::new();
        for entry in entries.iter().filter(|e| e.text == chosen.text) {
            if !candidates.contains(&entry.rule_key) {
                candidates.push(entry.rule_key.clone());
            }
        }
        if candidates.is_empty() {
            candidates.push(chosen.rule_key.clone());
        }

        EliminationRule {
            candidates,
            eliminates: chosen.rule_key.is_positive(),
        }
    }

    /// Keys still consistent with the presses so far
    pub fn candidates(&self) -> &[RuleKey] {
        &self.candidates
    }

    /// Whether pressing `pressed` rules out `key`
    fn violates(key: &RuleKey, panel: &ButtonPanel, pressed: ButtonIndex) -> bool {
        let pressed_pos = key.position_of(panel.number(pressed));
        panel.unconfirmed().any(|other| {
            match (pressed_pos, key.position_of(panel.number(other))) {
                (_, None) => false,
                (None, Some(_)) => true,
                (Some(p), Some(q)) => p > q,
            }
        })
    }
}

impl PressRule for EliminationRule {
    fn judge(&mut self, panel: &mut ButtonPanel, pressed: ButtonIndex) -> bool {
        if pressed >= BUTTON_COUNT {
            return false;
        }
        let mut correct = !panel.is_correct(pressed);

        if self.eliminates {
            let snapshot = &*panel;
            self.candidates
                .retain(|key| !Self::violates(key, snapshot, pressed));
        }
        if self.candidates.is_empty() {
            correct = false;
        }

        if correct {
            panel.set_correct(pressed, true);
        }
        correct
    }

    fn solution(&self, panel: &ButtonPanel) -> Option<Vec<ButtonIndex>> {
        let mut rule = self.clone();
        let mut panel = panel.clone();
        let mut order = Vec::new();

        while !panel.all_correct() {
            let next = panel.unconfirmed().find(|i| {
                let mut trial_rule = rule.clone();
                let mut trial_panel = panel.clone();
                trial_rule.judge(&mut trial_panel, *i)
            })?;
            rule.judge(&mut panel, next);
            order.push(next);
        }
        Some(order)
    }

    fn describe(&self) -> String {
        let ids: Vec<String> = self.candidates.iter().map(|k| k.to_string()).collect();
        format!("The candidate identifiers are {}.", ids.join(", "))
    }
}

//! A single randomized round: button labels, chosen phrase and its rule

use crate::core::{ButtonIndex, ButtonPanel, Led, PhraseEntry};
use crate::loader::PhraseBook;
use crate::rules::{ActiveRule, PressRule, RuleVariant};
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    panel: ButtonPanel,
    chosen: PhraseEntry,
    rule: ActiveRule,
}

impl Round {
    /// Draw labels and a phrase, then derive the rule for them
    pub fn randomize<R: Rng>(book: &PhraseBook, variant: RuleVariant, rng: &mut R) -> Self {
        let panel = ButtonPanel::random(rng);
        let chosen = book.choose(rng).clone();
        Round::new(panel, chosen, variant, book.entries())
    }

    /// Build a round from a known panel and phrase
    pub fn new(
        panel: ButtonPanel,
        chosen: PhraseEntry,
        variant: RuleVariant,
        entries: &[PhraseEntry],
    ) -> Self {
        let rule = ActiveRule::derive(variant, &chosen, entries, &panel);
        Round {
            panel,
            chosen,
            rule,
        }
    }

    /// Get the button panel
    pub fn panel(&self) -> &ButtonPanel {
        &self.panel
    }

    /// Get the displayed phrase entry
    pub fn chosen(&self) -> &PhraseEntry {
        &self.chosen
    }

    /// Get the rule judging this round
    pub fn rule(&self) -> &ActiveRule {
        &self.rule
    }

    /// Judge a press; a correct press lights the button green
    ///
    /// An index past the last button is always wrong.
    pub fn press(&mut self, index: ButtonIndex) -> bool {
        let correct = self.rule.judge(&mut self.panel, index);
        if correct {
            self.panel.set_led(index, Led::Green);
        }
        correct
    }

    /// Check if every button is confirmed
    pub fn is_complete(&self) -> bool {
        self.panel.all_correct()
    }

    /// Turn every light red while a strike is pending
    pub fn show_failure(&mut self) {
        self.panel.set_all_leds(Led::Red);
    }

    /// Presses that finish this round from its current state
    pub fn solution(&self) -> Option<Vec<ButtonIndex>> {
        self.rule.solution(&self.panel)
    }
}

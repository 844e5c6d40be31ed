//! Ordered subsequence matching
//!
//! The rule key's distinct digits, in first-occurrence order and restricted to
//! the labels on the panel, must be pressed first. Once that prefix is used up
//! each further press toggles the pressed button's state.

use crate::core::{ButtonIndex, ButtonPanel, RuleKey, BUTTON_COUNT};
use crate::rules::PressRule;
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsequenceRule {
    expected: SmallVec<[u8; 4]>,
    current_index: usize,
}

impl SubsequenceRule {
    /// Derive the expected sequence for a panel
    pub fn new(key: &RuleKey, panel: &ButtonPanel) -> Self {
        let mut expected: SmallVec<[u8; 4]> = SmallVec::new();
        for digit in key.digits().bytes().filter(u8::is_ascii_digit) {
            let digit = digit - b'0';
            if panel.contains(digit) && !expected.contains(&digit) {
                expected.push(digit);
            }
        }
        SubsequenceRule {
            expected,
            current_index: 0,
        }
    }

    /// Get the labels that must be pressed first, in order
    pub fn expected(&self) -> &[u8] {
        &self.expected
    }

    /// Number of expected labels already pressed
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// True once the expected prefix has been entered
    pub fn is_exhausted(&self) -> bool {
        self.current_index >= self.expected.len()
    }
}

impl PressRule for SubsequenceRule {
    fn judge(&mut self, panel: &mut ButtonPanel, pressed: ButtonIndex) -> bool {
        if pressed >= BUTTON_COUNT {
            return false;
        }
        let correct = match self.expected.get(self.current_index) {
            Some(next) => panel.number(pressed) == *next,
            None => !panel.is_correct(pressed),
        };
        panel.set_correct(pressed, correct);

        if correct && !self.is_exhausted() {
            self.current_index += 1;
        }
        correct
    }

    fn solution(&self, panel: &ButtonPanel) -> Option<Vec<ButtonIndex>> {
        let mut order: Vec<ButtonIndex> = self.expected[self.current_index..]
            .iter()
            .filter_map(|digit| panel.index_of(*digit))
            .collect();
        let rest: Vec<ButtonIndex> = panel
            .unconfirmed()
            .filter(|i| !order.contains(i))
            .collect();
        order.extend(rest);
        Some(order)
    }

    fn describe(&self) -> String {
        if self.expected.is_empty() {
            return "The expected sequence is anything.".to_string();
        }
        let digits: String = self.expected.iter().map(|d| char::from(b'0' + d)).collect();
        format!("The expected sequence is {digits}, followed by any other values if applicable.")
    }
}

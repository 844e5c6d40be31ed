//! The four numbered buttons and their status LEDs

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of buttons on every module
pub const BUTTON_COUNT: usize = 4;

/// Zero-based position of a button on the module (top to bottom)
pub type ButtonIndex = usize;

/// Status light shown next to each button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Led {
    /// Neutral, button not yet confirmed
    #[default]
    Off,
    /// Button confirmed correct
    Green,
    /// Shown on every button while a strike is pending
    Red,
}

/// Button labels, per-button correctness and LED colours for one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonPanel {
    numbers: [u8; BUTTON_COUNT],
    states: [bool; BUTTON_COUNT],
    leds: [Led; BUTTON_COUNT],
}

impl ButtonPanel {
    /// Draw four distinct digits in 0..=9
    ///
    /// Each digit is redrawn until it differs from every digit drawn before it.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut numbers = [0u8; BUTTON_COUNT];
        for i in 0..BUTTON_COUNT {
            let mut num = rng.gen_range(0..10u8);
            while numbers[..i].contains(&num) {
                num = rng.gen_range(0..10u8);
            }
            numbers[i] = num;
        }
        ButtonPanel::unpressed(numbers)
    }

    /// Build a panel from explicit labels
    ///
    /// Returns `None` unless all four labels are distinct digits.
    pub fn from_numbers(numbers: [u8; BUTTON_COUNT]) -> Option<Self> {
        let distinct = numbers
            .iter()
            .enumerate()
            .all(|(i, n)| *n <= 9 && !numbers[..i].contains(n));
        distinct.then(|| ButtonPanel::unpressed(numbers))
    }

    fn unpressed(numbers: [u8; BUTTON_COUNT]) -> Self {
        ButtonPanel {
            numbers,
            states: [false; BUTTON_COUNT],
            leds: [Led::Off; BUTTON_COUNT],
        }
    }

    /// Get all four labels, top to bottom
    pub fn numbers(&self) -> [u8; BUTTON_COUNT] {
        self.numbers
    }

    /// Get the label of one button
    pub fn number(&self, index: ButtonIndex) -> u8 {
        self.numbers[index]
    }

    /// Whether one of the buttons carries this label
    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }

    /// Find the button carrying a label
    pub fn index_of(&self, number: u8) -> Option<ButtonIndex> {
        self.numbers.iter().position(|n| *n == number)
    }

    /// Check if a button has been confirmed
    pub fn is_correct(&self, index: ButtonIndex) -> bool {
        self.states[index]
    }

    /// Mark a button confirmed or unconfirmed
    pub fn set_correct(&mut self, index: ButtonIndex, correct: bool) {
        self.states[index] = correct;
    }

    /// Get the confirmed state of every button
    pub fn states(&self) -> [bool; BUTTON_COUNT] {
        self.states
    }

    /// True once every button has been confirmed
    pub fn all_correct(&self) -> bool {
        self.states.iter().all(|s| *s)
    }

    /// Indices of buttons not yet confirmed
    pub fn unconfirmed(&self) -> impl Iterator<Item = ButtonIndex> + '_ {
        (0..BUTTON_COUNT).filter(move |i| !self.states[*i])
    }

    /// Get the LED colour of one button
    pub fn led(&self, index: ButtonIndex) -> Led {
        self.leds[index]
    }

    /// Get every LED colour
    pub fn leds(&self) -> [Led; BUTTON_COUNT] {
        self.leds
    }

    /// Set the LED colour of one button
    pub fn set_led(&mut self, index: ButtonIndex, led: Led) {
        self.leds[index] = led;
    }

    /// Set every LED to the same colour
    pub fn set_all_leds(&mut self, led: Led) {
        self.leds = [led; BUTTON_COUNT];
    }
}

//! Puzzle module state machine
//!
//! ```text
//! Idle --activate--> Active --all buttons, last stage--> Solved
//!                      |  ^
//!           wrong press|  |strike delay elapsed (stage reset to 0)
//!                      v  |
//!                    Striking
//! ```

use crate::core::{ButtonIndex, ButtonPanel, Led, BUTTON_COUNT};
use crate::game::host::ModuleHost;
use crate::game::logger::ModuleLogger;
use crate::game::round::Round;
use crate::game::timer::StrikeTimer;
use crate::game::ModuleConfig;
use crate::loader::PhraseBook;
use crate::rules::PressRule;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Identifier handed out by the module registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleId(pub u32);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle phase of a module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the host to activate it
    Idle,
    /// Accepting presses
    Active,
    /// Locked out until the strike timer fires
    Striking,
    /// Finished; presses are ignored
    Solved,
}

/// What a single press did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutcome {
    /// Module not accepting input (or no such button)
    Ignored,
    /// Correct press, round still in progress
    Correct,
    /// All four buttons confirmed, a new round for the next stage began
    StageCleared,
    /// All four buttons confirmed on the final stage
    Solved,
    /// Wrong press
    Strike,
}

pub struct PuzzleModule {
    id: ModuleId,
    config: ModuleConfig,
    book: Arc<PhraseBook>,
    rng: ChaCha12Rng,
    phase: Phase,
    stage: u32,
    round: Option<Round>,
    timer: StrikeTimer,
    logger: ModuleLogger,
}

impl PuzzleModule {
    /// Create an idle module drawing phrases from `book`
    ///
    /// A deserialized config may carry `max_stages = 0`; it is raised to one.
    pub fn new(id: ModuleId, book: Arc<PhraseBook>, mut config: ModuleConfig) -> Self {
        config.max_stages = config.max_stages.max(1);
        let rng = match config.seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::from_entropy(),
        };
        PuzzleModule {
            id,
            timer: StrikeTimer::new(config.strike_delay),
            logger: ModuleLogger::with_verbosity(id.0, config.verbosity),
            config,
            book,
            rng,
            phase: Phase::Idle,
            stage: 0,
            round: None,
        }
    }

    /// Get the registry-assigned id
    pub fn id(&self) -> ModuleId {
        self.id
    }

    /// Get the module settings
    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    /// Get the current lifecycle phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Check if presses are being accepted
    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Check if the module has been solved
    pub fn is_solved(&self) -> bool {
        self.phase == Phase::Solved
    }

    /// Stages cleared since the last strike
    pub fn stage(&self) -> u32 {
        self.stage
    }

    /// Get the current round, if activated
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Get the current button panel, if activated
    pub fn panel(&self) -> Option<&ButtonPanel> {
        self.round.as_ref().map(Round::panel)
    }

    /// Phrase currently on the display
    pub fn display_text(&self) -> &str {
        match (&self.round, self.phase) {
            (_, Phase::Solved) | (None, _) => "",
            (Some(round), _) => &round.chosen().text,
        }
    }

    /// Time left before a pending strike resets the module
    pub fn strike_remaining(&self) -> Option<Duration> {
        self.timer.remaining()
    }

    /// Get the module logger
    pub fn logger(&self) -> &ModuleLogger {
        &self.logger
    }

    /// Get mutable access to the module logger
    pub fn logger_mut(&mut self) -> &mut ModuleLogger {
        &mut self.logger
    }

    /// Start the module; ignored unless it is idle
    pub fn activate(&mut self, host: &mut dyn ModuleHost) {
        if self.phase != Phase::Idle {
            return;
        }
        self.stage = 0;
        self.phase = Phase::Active;
        self.randomize(host);
    }

    /// Replace the current round with a prepared one
    ///
    /// Used to set up known labels and phrases; ignored unless active.
    pub fn load_round(&mut self, round: Round, host: &mut dyn ModuleHost) {
        if self.phase != Phase::Active {
            return;
        }
        self.install(round, host);
    }

    fn randomize(&mut self, host: &mut dyn ModuleHost) {
        let round = Round::randomize(&self.book, self.config.variant, &mut self.rng);
        self.install(round, host);
    }

    fn install(&mut self, round: Round, host: &mut dyn ModuleHost) {
        let text = &round.chosen().text;
        self.logger.normal(&format!("The chosen phrase was {text}"));
        self.logger.normal(&format!(
            "The expected set of numbers is {}",
            round.chosen().rule_key
        ));
        self.logger.normal(&round.rule().describe());

        host.display_text(text);
        host.button_labels(round.panel().numbers());
        for index in 0..BUTTON_COUNT {
            host.button_led(index, Led::Off);
        }
        self.round = Some(round);
    }

    /// Handle a press of the button at `index`
    pub fn press(&mut self, index: ButtonIndex, host: &mut dyn ModuleHost) -> PressOutcome {
        if self.phase != Phase::Active || index >= BUTTON_COUNT {
            return PressOutcome::Ignored;
        }
        let Some(round) = self.round.as_mut() else {
            return PressOutcome::Ignored;
        };

        let number = round.panel().number(index);
        let correct = round.press(index);
        let complete = round.is_complete();
        if !correct {
            round.show_failure();
        }
        self.logger.normal(&format!("You pressed {number}."));

        if !correct {
            self.logger.minimal("Are you insane?");
            host.strike();
            for i in 0..BUTTON_COUNT {
                host.button_led(i, Led::Red);
            }
            self.phase = Phase::Striking;
            self.timer.arm();
            return PressOutcome::Strike;
        }

        host.button_led(index, Led::Green);
        if !complete {
            return PressOutcome::Correct;
        }

        self.stage += 1;
        if self.stage == self.config.max_stages {
            self.logger.minimal("Solved!");
            host.display_text("");
            host.pass();
            self.phase = Phase::Solved;
            PressOutcome::Solved
        } else {
            #[cfg(feature = "verbose-logging")]
            self.logger.verbose(&format!(
                "Stage {} of {} cleared.",
                self.stage, self.config.max_stages
            ));
            self.randomize(host);
            PressOutcome::StageCleared
        }
    }

    /// Advance the strike timer by `elapsed`
    ///
    /// Returns true if the timer fired and a fresh round from stage 0 began.
    pub fn tick(&mut self, elapsed: Duration, host: &mut dyn ModuleHost) -> bool {
        if self.phase != Phase::Striking || !self.timer.advance(elapsed) {
            return false;
        }
        self.logger.verbose("Strike delay over, starting again from stage 0.");
        self.stage = 0;
        self.phase = Phase::Active;
        self.randomize(host);
        true
    }

    /// Presses that finish the current round, if it can still be finished
    pub fn solve_sequence(&self) -> Option<Vec<ButtonIndex>> {
        if self.phase != Phase::Active {
            return None;
        }
        self.round.as_ref().and_then(Round::solution)
    }

    /// Press through every remaining stage until the module is solved
    ///
    /// A pending strike is waited out first. Returns the number of presses made,
    /// or `None` if a round turned out to be unsolvable.
    pub fn force_solve(&mut self, host: &mut dyn ModuleHost) -> Option<usize> {
        let mut presses = 0;
        loop {
            match self.phase {
                Phase::Solved => return Some(presses),
                Phase::Idle => self.activate(host),
                Phase::Striking => {
                    let remaining = self.timer.remaining().unwrap_or(Duration::ZERO);
                    self.tick(remaining, host);
                }
                Phase::Active => {
                    for index in self.solve_sequence()? {
                        presses += 1;
                        if self.press(index, host) == PressOutcome::Strike {
                            return None;
                        }
                    }
                }
            }
        }
    }
}

impl fmt::Debug for PuzzleModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PuzzleModule")
            .field("id", &self.id)
            .field("phase", &self.phase)
            .field("stage", &self.stage)
            .field("round", &self.round)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PhraseEntry;
    use crate::game::host::{ModuleEvent, RecordingHost};
    use crate::rules::RuleVariant;

    fn digit_book() -> Arc<PhraseBook> {
        Arc::new(PhraseBook::parse(r#"{"71": "Seven then one.", "2468": "Evens."}"#).unwrap())
    }

    fn module(config: ModuleConfig) -> PuzzleModule {
        let mut module = PuzzleModule::new(ModuleId(1), digit_book(), config.with_seed(5));
        module.logger_mut().enable_capture();
        module
    }

    fn fixed_round() -> Round {
        let chosen = PhraseEntry::with_digits("Seven then one.", "71");
        let panel = ButtonPanel::from_numbers([3, 7, 1, 9]).unwrap();
        Round::new(panel, chosen.clone(), RuleVariant::Subsequence, &[chosen])
    }

    #[test]
    fn test_presses_ignored_until_activated() {
        let mut host = RecordingHost::new();
        let mut module = module(ModuleConfig::default());
        assert_eq!(module.press(0, &mut host), PressOutcome::Ignored);
        assert!(host.events().is_empty());

        module.activate(&mut host);
        assert_eq!(module.phase(), Phase::Active);
        assert!(module.round().is_some());
        assert!(matches!(host.events()[0], ModuleEvent::DisplayText(_)));
    }

    #[test]
    fn test_out_of_range_button_is_ignored() {
        let mut host = RecordingHost::new();
        let mut module = module(ModuleConfig::default());
        module.activate(&mut host);
        assert_eq!(module.press(BUTTON_COUNT, &mut host), PressOutcome::Ignored);
    }

    #[test]
    fn test_solve_in_expected_order() {
        let mut host = RecordingHost::new();
        let mut module = module(ModuleConfig::default());
        module.activate(&mut host);
        module.load_round(fixed_round(), &mut host);

        assert_eq!(module.press(1, &mut host), PressOutcome::Correct);
        assert_eq!(module.press(2, &mut host), PressOutcome::Correct);
        assert_eq!(module.press(0, &mut host), PressOutcome::Correct);
        assert_eq!(module.press(3, &mut host), PressOutcome::Solved);
        assert!(module.is_solved());
        assert!(host.solved());
        assert_eq!(host.last_display_text(), Some(""));
        assert_eq!(module.press(0, &mut host), PressOutcome::Ignored);
    }

    #[test]
    fn test_strike_locks_then_resets() {
        let mut host = RecordingHost::new();
        let mut module = module(ModuleConfig::default());
        module.activate(&mut host);
        module.load_round(fixed_round(), &mut host);

        assert_eq!(module.press(2, &mut host), PressOutcome::Strike);
        assert_eq!(module.phase(), Phase::Striking);
        assert_eq!(host.strikes(), 1);
        assert_eq!(module.panel().unwrap().leds(), [Led::Red; BUTTON_COUNT]);
        assert_eq!(module.press(1, &mut host), PressOutcome::Ignored);

        assert!(!module.tick(Duration::from_millis(999), &mut host));
        assert!(module.tick(Duration::from_millis(1), &mut host));
        assert_eq!(module.phase(), Phase::Active);
        assert_eq!(module.stage(), 0);
        assert_eq!(module.panel().unwrap().leds(), [Led::Off; BUTTON_COUNT]);
    }

    #[test]
    fn test_log_lines_describe_round() {
        let mut host = RecordingHost::new();
        let mut module = module(ModuleConfig::default());
        module.activate(&mut host);
        module.logger_mut().clear_logs();
        module.load_round(fixed_round(), &mut host);
        module.press(1, &mut host);

        let messages: Vec<String> = module.logger().logs().iter().map(|e| e.message.clone()).collect();
        assert_eq!(
            messages,
            vec![
                "The chosen phrase was Seven then one.".to_string(),
                "The expected set of numbers is 71".to_string(),
                "The expected sequence is 71, followed by any other values if applicable.".to_string(),
                "You pressed 7.".to_string(),
            ]
        );
    }

    #[test]
    fn test_force_solve_multi_stage() {
        let mut host = RecordingHost::new();
        let mut module = module(ModuleConfig::default().with_max_stages(3));
        let presses = module.force_solve(&mut host).expect("solvable");
        assert_eq!(presses, 12);
        assert!(module.is_solved());
        assert_eq!(module.stage(), 3);
        assert_eq!(host.strikes(), 0);
    }

    #[test]
    fn test_zero_stages_from_json_still_solves() {
        let mut json = serde_json::to_value(ModuleConfig::default()).unwrap();
        json["max_stages"] = serde_json::json!(0);
        let config: ModuleConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.max_stages, 0);

        let mut host = RecordingHost::new();
        let mut module = module(config);
        assert_eq!(module.config().max_stages, 1);
        assert_eq!(module.force_solve(&mut host), Some(4));
        assert!(module.is_solved());
        assert_eq!(module.stage(), 1);
    }
}

//! End-to-end tests for text commands dispatched through the registry

use insane_talk::{
    command::{parse_command, CommandError},
    core::{ButtonPanel, PhraseEntry},
    game::{ModuleConfig, ModuleRegistry, PressOutcome, RecordingHost, Round, RuleVariant},
    loader::PhraseBook,
    TalkError,
};
use std::sync::Arc;

fn setup() -> (ModuleRegistry, insane_talk::game::ModuleId, RecordingHost) {
    let book = Arc::new(PhraseBook::parse(r#"{"71": "Seven, then one."}"#).unwrap());
    let mut registry = ModuleRegistry::new();
    let id = registry.register(book, ModuleConfig::default().with_seed(77));
    let mut host = RecordingHost::new();
    registry.get_mut(id).unwrap().logger_mut().enable_capture();
    registry.activate_all(&mut host);

    let chosen = PhraseEntry::with_digits("Seven, then one.", "71");
    let panel = ButtonPanel::from_numbers([3, 7, 1, 9]).unwrap();
    let round = Round::new(panel, chosen.clone(), RuleVariant::Subsequence, &[chosen]);
    registry.get_mut(id).unwrap().load_round(round, &mut host);
    (registry, id, host)
}

#[test]
fn test_position_out_of_range_is_rejected() {
    let panel = ButtonPanel::from_numbers([3, 7, 1, 9]).unwrap();
    assert_eq!(
        parse_command("position 5 1 2 3", &panel),
        Err(CommandError::PositionTooBig(5))
    );
}

#[test]
fn test_missing_label_is_rejected() {
    let panel = ButtonPanel::from_numbers([3, 7, 1, 8]).unwrap();
    assert_eq!(
        parse_command("label 9 9", &panel),
        Err(CommandError::LabelNotFound(9))
    );
}

#[test]
fn test_label_command_solves_module() {
    let (mut registry, id, mut host) = setup();
    let outcomes = registry.run_command(id, "label 7 1 3 9", &mut host).unwrap();
    assert_eq!(
        outcomes,
        vec![
            PressOutcome::Correct,
            PressOutcome::Correct,
            PressOutcome::Correct,
            PressOutcome::Solved
        ]
    );
    assert!(host.solved());
}

#[test]
fn test_position_command_with_joined_digits() {
    let (mut registry, id, mut host) = setup();
    let outcomes = registry.run_command(id, "pos 2314", &mut host).unwrap();
    assert_eq!(outcomes.last(), Some(&PressOutcome::Solved));
}

#[test]
fn test_command_stops_at_strike() {
    let (mut registry, id, mut host) = setup();
    let outcomes = registry.run_command(id, "label 1 7 3 9", &mut host).unwrap();
    assert_eq!(outcomes, vec![PressOutcome::Strike]);
    assert_eq!(host.strikes(), 1);
}

#[test]
fn test_bad_command_changes_nothing() {
    let (mut registry, id, mut host) = setup();
    host.take_events();

    for (input, expected) in [
        ("label 7 x", CommandError::InvalidDigit("x".to_string())),
        ("position 0 1", CommandError::PositionTooSmall),
        ("label 7 1 3 9 7", CommandError::TooManyDigits),
        ("dance 1", CommandError::InvalidCommand),
    ] {
        match registry.run_command(id, input, &mut host) {
            Err(TalkError::Command(e)) => assert_eq!(e, expected, "{input}"),
            other => panic!("expected command error for {input}, got {other:?}"),
        }
    }
    assert!(host.events().is_empty());
    assert_eq!(registry.get(id).unwrap().panel().unwrap().states(), [false; 4]);
}

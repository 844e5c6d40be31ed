//! Text command front-end
//!
//! Turns chat-style commands into button presses.
//!
//! ## Command Syntax
//!
//! - `label 1 2 3 4` presses the buttons labelled 1, 2, 3 and 4
//! - `position 1 2 3 4` presses the buttons in positions 1 to 4 (top to bottom)
//! - **Verbs**: `label`/`lab`/`l` and `position`/`pos`/`press`/`p` (case-insensitive)
//! - **Digits**: one to four, space-separated or run together (`label 1234`)

use crate::core::{ButtonIndex, ButtonPanel, BUTTON_COUNT};
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag},
    character::complete::{digit1, space0, space1},
    combinator::{all_consuming, value},
    multi::separated_list1,
    sequence::terminated,
    IResult,
};
use smallvec::SmallVec;
use thiserror::Error;

pub const HELP_MESSAGE: &str = "Use 'label 1 2 3 4' to press the buttons labelled 1, 2, 3 and 4. \
Use 'position 1 2 3 4' to press the buttons in positions 1, 2, 3 and 4. \
Buttons are numbered from 1 to 4 going from the top to the bottom.";

/// Button presses a command resolved to, in order
pub type ButtonPresses = SmallVec<[ButtonIndex; BUTTON_COUNT]>;

/// User-facing command errors; none of them change module state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command.")]
    InvalidCommand,

    #[error("Digit not valid: '{0}'.")]
    InvalidDigit(String),

    #[error("Number too small!")]
    PositionTooSmall,

    #[error("Number too big! ({0})")]
    PositionTooBig(u8),

    #[error("Label not found! ({0})")]
    LabelNotFound(u8),

    #[error("Too many digits!")]
    TooManyDigits,
}

/// How the digits of a command select buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// Digits are button labels
    Label,
    /// Digits are 1-based button positions
    Position,
}

/// A syntactically valid command, not yet checked against a panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub verb: Verb,
    pub digits: Vec<u8>,
}

fn verb(input: &str) -> IResult<&str, Verb> {
    alt((
        value(
            Verb::Position,
            alt((tag("position"), tag("press"), tag("pos"), tag("p"))),
        ),
        value(Verb::Label, alt((tag("label"), tag("lab"), tag("l")))),
    ))(input)
}

fn arguments(input: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(space1, is_not(" \t"))(input)
}

fn command(input: &str) -> IResult<&str, (Verb, Vec<&str>)> {
    let (input, _) = space0(input)?;
    let (input, verb) = terminated(verb, space1)(input)?;
    let (input, args) = terminated(arguments, space0)(input)?;
    Ok((input, (verb, args)))
}

fn digit_group(input: &str) -> IResult<&str, &str> {
    all_consuming(digit1)(input)
}

impl ParsedCommand {
    /// Parse a command string
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let lowered = input.trim().to_lowercase();
        let (rest, (verb, args)) = command(&lowered).map_err(|_| CommandError::InvalidCommand)?;
        if !rest.is_empty() {
            return Err(CommandError::InvalidCommand);
        }

        let mut digits = Vec::new();
        for arg in args {
            let (_, group) =
                digit_group(arg).map_err(|_| CommandError::InvalidDigit(arg.to_string()))?;
            digits.extend(group.bytes().map(|b| b - b'0'));
        }
        Ok(ParsedCommand { verb, digits })
    }

    /// Map the digits onto buttons of `panel`
    ///
    /// Digits are checked in order and the first problem found is reported.
    pub fn resolve(&self, panel: &ButtonPanel) -> Result<ButtonPresses, CommandError> {
        let mut presses = ButtonPresses::new();
        for (n, digit) in self.digits.iter().copied().enumerate() {
            if n >= BUTTON_COUNT {
                return Err(CommandError::TooManyDigits);
            }
            let index = match self.verb {
                Verb::Position => match digit {
                    0 => return Err(CommandError::PositionTooSmall),
                    d if usize::from(d) > BUTTON_COUNT => {
                        return Err(CommandError::PositionTooBig(d))
                    }
                    d => usize::from(d) - 1,
                },
                Verb::Label => panel
                    .index_of(digit)
                    .ok_or(CommandError::LabelNotFound(digit))?,
            };
            presses.push(index);
        }
        Ok(presses)
    }
}

/// Parse a command and resolve it against the current panel
pub fn parse_command(input: &str, panel: &ButtonPanel) -> Result<ButtonPresses, CommandError> {
    ParsedCommand::parse(input)?.resolve(panel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel() -> ButtonPanel {
        ButtonPanel::from_numbers([3, 7, 1, 9]).unwrap()
    }

    #[test]
    fn test_parse_verbs() {
        for (input, verb) in [
            ("label 1", Verb::Label),
            ("lab 1", Verb::Label),
            ("l 1", Verb::Label),
            ("position 1", Verb::Position),
            ("pos 1", Verb::Position),
            ("press 1", Verb::Position),
            ("p 1", Verb::Position),
            ("  LABEL 1 ", Verb::Label),
        ] {
            assert_eq!(ParsedCommand::parse(input).unwrap().verb, verb, "{input}");
        }
    }

    #[test]
    fn test_digits_spaced_or_joined() {
        assert_eq!(ParsedCommand::parse("label 1 2 3").unwrap().digits, vec![1, 2, 3]);
        assert_eq!(ParsedCommand::parse("label 123").unwrap().digits, vec![1, 2, 3]);
        assert_eq!(ParsedCommand::parse("label 12 3").unwrap().digits, vec![1, 2, 3]);
    }

    #[test]
    fn test_invalid_commands() {
        assert_eq!(ParsedCommand::parse("jump 1"), Err(CommandError::InvalidCommand));
        assert_eq!(ParsedCommand::parse("label"), Err(CommandError::InvalidCommand));
        assert_eq!(ParsedCommand::parse("labels 1"), Err(CommandError::InvalidCommand));
        assert_eq!(
            ParsedCommand::parse("label 1 x"),
            Err(CommandError::InvalidDigit("x".to_string()))
        );
        assert_eq!(
            ParsedCommand::parse("position 1 -2"),
            Err(CommandError::InvalidDigit("-2".to_string()))
        );
    }

    #[test]
    fn test_resolve_labels() {
        let presses = parse_command("label 7 1 9 3", &panel()).unwrap();
        assert_eq!(presses.as_slice(), &[1, 2, 3, 0]);
    }

    #[test]
    fn test_resolve_positions() {
        let presses = parse_command("position 4 3 2 1", &panel()).unwrap();
        assert_eq!(presses.as_slice(), &[3, 2, 1, 0]);
    }

    #[test]
    fn test_position_out_of_range() {
        assert_eq!(
            parse_command("position 5 1 2 3", &panel()),
            Err(CommandError::PositionTooBig(5))
        );
        assert_eq!(
            parse_command("position 0", &panel()),
            Err(CommandError::PositionTooSmall)
        );
    }

    #[test]
    fn test_label_not_on_panel() {
        let panel = ButtonPanel::from_numbers([3, 7, 1, 8]).unwrap();
        assert_eq!(
            parse_command("label 9 9", &panel),
            Err(CommandError::LabelNotFound(9))
        );
    }

    #[test]
    fn test_too_many_digits() {
        assert_eq!(
            parse_command("label 3 7 1 9 3", &panel()),
            Err(CommandError::TooManyDigits)
        );
        assert_eq!(
            parse_command("position 12341", &panel()),
            Err(CommandError::TooManyDigits)
        );
    }

    #[test]
    fn test_error_messages_are_user_facing() {
        assert_eq!(CommandError::TooManyDigits.to_string(), "Too many digits!");
        assert_eq!(CommandError::PositionTooSmall.to_string(), "Number too small!");
    }
}

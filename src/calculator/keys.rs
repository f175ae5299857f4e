//! Input events and their keyboard and typed spellings.
//!
//! Callers translate whatever their surface produces (key presses, button
//! ids, a typed line) into [`Input`] values and feed them to the engine.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::function::{AngleMode, Constant, Function};
use super::memory::MemoryOp;
use super::operator::Operator;

/// One discrete event for the calculator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Input {
    Digit(u8),
    DecimalPoint,
    Operator(Operator),
    Negate,
    Function(Function),
    Constant(Constant),
    Equals,
    Backspace,
    Clear,
    Memory(MemoryOp),
    OpenParen,
    ToggleAngleMode,
    SetAngleMode(AngleMode),
    ToggleScientific,
    ClearHistory,
    RecallHistory(usize),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Unknown input: {0}")]
    Unknown(String),
}

lazy_static! {
    /// Splits a typed line into numbers, words and single symbols.
    /// Words may end in `+` or `-` so `m+` and `m-` stay whole; the
    /// hyphenated memory names and `1/x` are matched before anything else.
    static ref TOKEN: Regex = Regex::new(
        r"(?i:m-plus|m-minus)|1/x|\d+\.?\d*|\.\d+|[A-Za-z][A-Za-z0-9]*[+\-]?|\*\*|\S"
    ).unwrap();
}

impl Input {
    /// Map a keyboard key name to an input.
    ///
    /// Covers the keys a physical keypad offers; everything else is `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "." | "," => Some(Self::DecimalPoint),
            "=" | "Enter" => Some(Self::Equals),
            "Backspace" => Some(Self::Backspace),
            "Escape" | "Delete" => Some(Self::Clear),
            "(" => Some(Self::OpenParen),
            _ => {
                let mut chars = key.chars();
                if let (Some(c), None) = (chars.next(), chars.next())
                    && let Some(digit) = c.to_digit(10)
                {
                    return Some(Self::Digit(digit as u8));
                }
                Operator::from_symbol(key).map(Self::Operator)
            }
        }
    }

    /// Map a typed word (function, constant, command) to an input.
    pub fn from_word(word: &str) -> Option<Self> {
        if let Some(input) = Self::from_key(word) {
            return Some(input);
        }
        if let Some(function) = Function::from_name(word) {
            return Some(Self::Function(function));
        }
        if let Some(constant) = Constant::from_name(word) {
            return Some(Self::Constant(constant));
        }
        if let Some(op) = MemoryOp::from_name(word) {
            return Some(Self::Memory(op));
        }

        match word.to_lowercase().as_str() {
            "c" | "ac" | "clear" => Some(Self::Clear),
            "bs" | "back" | "backspace" => Some(Self::Backspace),
            "neg" | "negate" | "±" | "+/-" => Some(Self::Negate),
            "pow" => Some(Self::Operator(Operator::Power)),
            "deg" => Some(Self::SetAngleMode(AngleMode::Deg)),
            "rad" => Some(Self::SetAngleMode(AngleMode::Rad)),
            "angle" => Some(Self::ToggleAngleMode),
            "sci" => Some(Self::ToggleScientific),
            _ => None,
        }
    }
}

/// Turn a typed line such as `12.5 * sin 30 =` into inputs.
///
/// Numbers expand to their individual digit and point presses.
pub fn tokenize(line: &str) -> Result<Vec<Input>, KeyError> {
    let mut inputs = Vec::new();

    for token in TOKEN.find_iter(line).map(|m| m.as_str()) {
        let is_number = token.starts_with(|c: char| c.is_ascii_digit() || c == '.')
            && token != "."
            && token != "1/x";
        if is_number {
            inputs.extend(token.chars().filter_map(|c| Input::from_key(&c.to_string())));
            continue;
        }

        if let Some(input) = Input::from_word(token) {
            inputs.push(input);
            continue;
        }

        // A word glued to a trailing operator, e.g. `pi+`.
        let split = token.char_indices().last().and_then(|(idx, _)| {
            let (word, symbol) = token.split_at(idx);
            Some((Input::from_word(word)?, Operator::from_symbol(symbol)?))
        });
        match split {
            Some((input, operator)) => {
                inputs.push(input);
                inputs.push(Input::Operator(operator));
            }
            None => return Err(KeyError::Unknown(token.to_string())),
        }
    }

    Ok(inputs)
}

//! Calculator engine driven by discrete key events.
//!
//! This module provides:
//! - The [`Calculator`] state machine and its [`Input`] events
//! - Binary operators, unary functions and constants
//! - Rounding and display formatting for results
//! - Memory register and bounded history

mod engine;
mod entry;
mod error;
mod format;
mod function;
mod history;
mod keys;
mod memory;
mod operator;

pub use engine::{Calculator, Phase};
pub use entry::{Entry, MAX_INPUT_LEN};
pub use error::CalcError;
pub use format::{format_entry, format_number, parse_display, round_to_precision};
pub use function::{AngleMode, Constant, Function};
pub use history::{DEFAULT_MAX_HISTORY_ITEMS, History, HistoryEntry};
pub use keys::{Input, KeyError, tokenize};
pub use memory::{Memory, MemoryOp};
pub use operator::Operator;

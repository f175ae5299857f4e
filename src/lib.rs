//! zcalc - a keypad calculator engine.
//!
//! The [`calculator::Calculator`] consumes one input event at a time
//! (digits, operators, functions, memory keys) and exposes the display
//! text, expression line, memory flag and history for a front end to draw.
//!
//! ```rust
//! use zcalc::calculator::{Calculator, Input, Operator};
//!
//! let mut calc = Calculator::default();
//! for input in [
//!     Input::Digit(5),
//!     Input::Operator(Operator::Add),
//!     Input::Digit(3),
//!     Input::Equals,
//!     Input::Equals,
//! ] {
//!     calc.handle(input).unwrap();
//! }
//! assert_eq!(calc.display(), "11");
//! ```

pub mod calculator;
pub mod config;

pub use calculator::{CalcError, Calculator, Input};
pub use config::{Settings, Snapshot};

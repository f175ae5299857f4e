//! The calculator state machine.
//!
//! A [`Calculator`] consumes one [`Input`] at a time. Its state is the entry
//! buffer, an optional pending binary operation, and a [`Phase`] that says
//! how the next key relates to what is on screen. Every fallible operation
//! computes its result before touching any state, so an error leaves the
//! calculator exactly as it was.

use tracing::debug;

use super::entry::Entry;
use super::error::CalcError;
use super::format::{format_entry, format_number, round_to_precision};
use super::function::{AngleMode, Constant, Function};
use super::history::{History, HistoryEntry};
use super::keys::Input;
use super::memory::{Memory, MemoryOp};
use super::operator::Operator;
use crate::config::{Settings, Snapshot};

/// How the next key relates to the value on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Digits extend the entry. A fresh calculator starts here with `"0"`.
    Editing,
    /// An operator was just chosen; the next digit starts the right operand.
    AwaitingOperand,
    /// The entry holds a finished value (result, function, constant, recall).
    /// The next digit starts a new number and backspace clears everything.
    Settled,
}

/// An operator together with one operand.
///
/// While pending, `operand` is the left-hand side. As the remembered last
/// operation, it is the right-hand side re-applied by repeated equals.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Operation {
    operator: Operator,
    operand: f64,
}

#[derive(Clone, Debug)]
pub struct Calculator {
    entry: Entry,
    phase: Phase,
    pending: Option<Operation>,
    last_operation: Option<Operation>,
    expression: String,
    memory: Memory,
    history: History,
    angle_mode: AngleMode,
    scientific_mode: bool,
    settings: Settings,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Calculator {
    pub fn new(settings: Settings) -> Self {
        let settings = settings.validated();
        Self {
            entry: Entry::default(),
            phase: Phase::Editing,
            pending: None,
            last_operation: None,
            expression: String::new(),
            memory: Memory::default(),
            history: History::new(settings.max_history_items),
            angle_mode: settings.angle_mode,
            scientific_mode: false,
            settings,
        }
    }

    /// Rebuild a calculator from saved state.
    pub fn restore(snapshot: Snapshot) -> Self {
        let mut calculator = Self::new(snapshot.settings);
        calculator.memory = Memory::new(snapshot.memory);
        calculator.history =
            History::from_entries(snapshot.history, calculator.settings.max_history_items);
        calculator.angle_mode = snapshot.angle_mode;
        calculator.scientific_mode = snapshot.scientific_mode;
        calculator
    }

    /// Dispatch a single input event.
    pub fn handle(&mut self, input: Input) -> Result<(), CalcError> {
        debug!(?input, phase = ?self.phase, "handling input");

        let outcome = match input {
            Input::Digit(digit) => {
                self.input_digit(digit);
                Ok(())
            }
            Input::DecimalPoint => {
                self.input_decimal_point();
                Ok(())
            }
            Input::Operator(operator) => self.input_operator(operator),
            Input::Negate => {
                self.negate();
                Ok(())
            }
            Input::Function(function) => self.apply_function(function),
            Input::Constant(constant) => {
                self.input_constant(constant);
                Ok(())
            }
            Input::Equals => self.equals(),
            Input::Backspace => {
                self.backspace();
                Ok(())
            }
            Input::Clear => {
                self.clear();
                Ok(())
            }
            Input::Memory(op) => {
                self.memory_op(op);
                Ok(())
            }
            Input::OpenParen => {
                self.input_parenthesis();
                Ok(())
            }
            Input::ToggleAngleMode => {
                self.toggle_angle_mode();
                Ok(())
            }
            Input::SetAngleMode(mode) => {
                self.set_angle_mode(mode);
                Ok(())
            }
            Input::ToggleScientific => {
                self.toggle_scientific_mode();
                Ok(())
            }
            Input::ClearHistory => {
                self.clear_history();
                Ok(())
            }
            Input::RecallHistory(index) => {
                self.recall_history(index);
                Ok(())
            }
        };

        if let Err(err) = &outcome {
            debug!(?input, %err, "input rejected");
        }
        outcome
    }

    // Number entry

    /// Type a digit `0`-`9`. Other values are ignored.
    pub fn input_digit(&mut self, digit: u8) {
        if digit > 9 {
            return;
        }
        if self.phase != Phase::Editing {
            self.start_entry();
        }
        self.entry.push_digit(digit);
    }

    /// Type a decimal point. A second point in the same number is ignored.
    pub fn input_decimal_point(&mut self) {
        if self.phase != Phase::Editing {
            self.start_entry();
        }
        self.entry.push_point();
    }

    /// Flip the sign of the value on screen without touching any pending
    /// operation.
    pub fn negate(&mut self) {
        self.entry.negate();
    }

    /// Remove the last typed character. Acts as [`Calculator::clear`] when a
    /// finished value is on screen and does nothing right after an operator.
    pub fn backspace(&mut self) {
        match self.phase {
            Phase::Settled => self.clear(),
            Phase::AwaitingOperand => {}
            Phase::Editing => {
                self.entry.pop();
            }
        }
    }

    /// Reset to idle. Memory, history, settings and modes are kept.
    pub fn clear(&mut self) {
        self.entry = Entry::default();
        self.phase = Phase::Editing;
        self.pending = None;
        self.last_operation = None;
        self.expression.clear();
    }

    /// Start a new number in place of a finished value or after an operator.
    fn start_entry(&mut self) {
        if self.phase == Phase::Settled {
            self.expression = match self.pending {
                Some(pending) => self.operation_prefix(pending),
                None => String::new(),
            };
        }
        self.entry = Entry::default();
        self.phase = Phase::Editing;
    }

    // Operators

    /// Choose a binary operator.
    ///
    /// With nothing pending the value on screen becomes the left operand.
    /// Pressing another operator straight after one replaces it. Otherwise
    /// a right operand has been supplied, so the pending operation is
    /// evaluated first and its result becomes the new left operand
    /// (left-to-right, no precedence).
    pub fn input_operator(&mut self, operator: Operator) -> Result<(), CalcError> {
        let current = self.entry.value();

        let operand = match self.pending {
            None => current,
            Some(pending) if self.phase == Phase::AwaitingOperand => pending.operand,
            Some(pending) => {
                let result = self.evaluate(pending, current)?;
                self.entry = Entry::from_value(result);
                result
            }
        };

        let pending = Operation { operator, operand };
        self.pending = Some(pending);
        self.expression = self.operation_prefix(pending);
        self.phase = Phase::AwaitingOperand;
        Ok(())
    }

    /// Complete the calculation.
    ///
    /// A pending operation is applied to the value on screen. With nothing
    /// pending and a finished value on screen, the last operator and right
    /// operand are applied again, so `5 + 3 = =` gives `8` then `11`.
    pub fn equals(&mut self) -> Result<(), CalcError> {
        let current = self.entry.value();

        let (operation, rhs) = match (self.pending, self.last_operation) {
            (Some(pending), _) => (pending, current),
            (None, Some(last)) if self.phase == Phase::Settled => (
                Operation {
                    operator: last.operator,
                    operand: current,
                },
                last.operand,
            ),
            _ => return Ok(()),
        };

        let result = self.evaluate(operation, rhs)?;
        let expression = format!("{}{}", self.operation_prefix(operation), self.format(rhs));
        debug!(%expression, result, "calculated");

        self.history.push(HistoryEntry::new(expression.clone(), result));
        self.expression = format!("{} =", expression);
        self.entry = Entry::from_value(result);
        self.pending = None;
        self.phase = Phase::Settled;
        Ok(())
    }

    /// Apply `operation` with `rhs` as the right operand and remember it for
    /// repeated equals. Nothing is recorded on failure.
    fn evaluate(&mut self, operation: Operation, rhs: f64) -> Result<f64, CalcError> {
        let result = operation.operator.apply(operation.operand, rhs)?;
        self.last_operation = Some(Operation {
            operator: operation.operator,
            operand: rhs,
        });
        Ok(self.round(result))
    }

    // Functions and constants

    /// Apply a single-operand function to the value on screen.
    pub fn apply_function(&mut self, function: Function) -> Result<(), CalcError> {
        let value = self.entry.value();
        let result = self.round(function.apply(value, self.angle_mode)?);
        let expression = format!("{}({})", function.symbol(), self.format(value));
        debug!(%expression, result, "applied function");

        self.history.push(HistoryEntry::new(expression.clone(), result));
        self.expression = expression;
        self.entry = Entry::from_value(result);
        self.phase = Phase::Settled;
        Ok(())
    }

    /// Replace the value on screen with a constant. Not recorded in history.
    pub fn input_constant(&mut self, constant: Constant) {
        self.entry = Entry::from_value(self.round(constant.value()));
        self.expression = constant.symbol().to_string();
        self.phase = Phase::Settled;
    }

    /// Append `(` to the expression line. Purely cosmetic: parentheses do
    /// not group anything.
    pub fn input_parenthesis(&mut self) {
        self.expression.push('(');
    }

    // Memory

    /// Run a memory key. Memory keys never fail.
    pub fn memory_op(&mut self, op: MemoryOp) {
        match op {
            MemoryOp::Clear => self.memory_clear(),
            MemoryOp::Recall => self.memory_recall(),
            MemoryOp::Store => self.memory_store(),
            MemoryOp::Add => self.memory_add(),
            MemoryOp::Subtract => self.memory_subtract(),
        }
    }

    /// `mc`: zero the register.
    pub fn memory_clear(&mut self) {
        self.memory.clear();
    }

    /// Load memory as a finished value.
    pub fn memory_recall(&mut self) {
        self.entry = Entry::from_value(self.round(self.memory.value()));
        self.phase = Phase::Settled;
    }

    /// `ms`: store the value on screen.
    pub fn memory_store(&mut self) {
        self.memory.store(self.entry.value());
    }

    /// `m+`: add the value on screen to the register.
    pub fn memory_add(&mut self) {
        self.accumulate(self.memory.value() + self.entry.value());
    }

    /// `m-`: subtract the value on screen from the register.
    pub fn memory_subtract(&mut self) {
        self.accumulate(self.memory.value() - self.entry.value());
    }

    /// Store a new register total. A sum that overflows is dropped and the
    /// register keeps its previous value.
    fn accumulate(&mut self, total: f64) {
        if !total.is_finite() {
            debug!(memory = self.memory.value(), "memory overflow, keeping value");
            return;
        }
        self.memory.store(self.round(total));
    }

    // History

    /// Load a history entry's result as a finished value. Index 0 is the
    /// newest entry. Returns `false` if there is no such entry.
    pub fn recall_history(&mut self, index: usize) -> bool {
        let Some(recalled) = self.history.get(index) else {
            return false;
        };
        self.expression = recalled.expression.clone();
        self.entry = Entry::from_value(recalled.result);
        self.phase = Phase::Settled;
        true
    }

    /// Drop every history entry.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // Modes and settings

    /// Switch between degrees and radians.
    pub fn toggle_angle_mode(&mut self) {
        self.angle_mode = self.angle_mode.toggled();
    }

    /// Unit used by trig input and inverse-trig output.
    pub fn set_angle_mode(&mut self, angle_mode: AngleMode) {
        self.angle_mode = angle_mode;
    }

    /// Only decides which functions a front end offers; every function is
    /// always available to [`Calculator::apply_function`].
    pub fn toggle_scientific_mode(&mut self) {
        self.scientific_mode = !self.scientific_mode;
    }

    /// Change the history cap, dropping the oldest entries past it.
    pub fn set_max_history_items(&mut self, max_items: usize) {
        self.history.set_max_items(max_items);
        self.settings.max_history_items = self.history.max_items();
    }

    /// Replace the settings. The current angle mode is left alone.
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings.validated();
        self.history.set_max_items(self.settings.max_history_items);
    }

    // Read side

    /// Text for the main display.
    pub fn display(&self) -> String {
        let grouped = self.settings.thousands_separator;
        match self.phase {
            Phase::Editing => format_entry(self.entry.as_str(), grouped),
            Phase::AwaitingOperand | Phase::Settled => format_number(self.entry.value(), grouped),
        }
    }

    /// Text for the expression line above the display.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Raw text of the entry buffer.
    pub fn current_input(&self) -> &str {
        self.entry.as_str()
    }

    pub fn current_value(&self) -> f64 {
        self.entry.value()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True when nothing has been typed and nothing is pending.
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Editing
            && self.pending.is_none()
            && self.entry.is_zero()
            && self.expression.is_empty()
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending.map(|pending| pending.operator)
    }

    pub fn pending_operand(&self) -> Option<f64> {
        self.pending.map(|pending| pending.operand)
    }

    pub fn memory(&self) -> f64 {
        self.memory.value()
    }

    pub fn memory_active(&self) -> bool {
        self.memory.is_active()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn scientific_mode(&self) -> bool {
        self.scientific_mode
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn operation_prefix(&self, operation: Operation) -> String {
        format!(
            "{} {} ",
            self.format(operation.operand),
            operation.operator.symbol()
        )
    }

    fn format(&self, value: f64) -> String {
        format_number(value, self.settings.thousands_separator)
    }

    fn round(&self, value: f64) -> f64 {
        round_to_precision(value, self.settings.precision)
    }
}

//! Binary operators.

use super::error::CalcError;

/// A pending two-operand operation.
///
/// Sign change is not listed here; it acts on the entry in place and never
/// becomes pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Percent,
    Power,
}

impl Operator {
    /// Symbol used when writing the operation into the expression line.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "−",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Percent => "%",
            Self::Power => "^",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Add => "addition",
            Self::Subtract => "subtraction",
            Self::Multiply => "multiplication",
            Self::Divide => "division",
            Self::Percent => "percentage",
            Self::Power => "power",
        }
    }

    /// Parse an operator from a key or typed symbol.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Add),
            "-" | "−" => Some(Self::Subtract),
            "*" | "×" => Some(Self::Multiply),
            "/" | "÷" => Some(Self::Divide),
            "%" => Some(Self::Percent),
            "^" | "**" => Some(Self::Power),
            _ => None,
        }
    }

    /// Apply the operator to `lhs` and `rhs`.
    ///
    /// Division by an exact zero and any non-finite result are errors; the
    /// result is not rounded here.
    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        let result = match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                lhs / rhs
            }
            Self::Percent => lhs * (rhs / 100.0),
            Self::Power => lhs.powf(rhs),
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::domain(self.name()))
        }
    }
}

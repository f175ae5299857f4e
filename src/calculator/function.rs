//! Single-operand functions, constants and the trig angle mode.

use std::f64::consts::{E, PI};

use serde::{Deserialize, Serialize};

use super::error::CalcError;
use super::format::NOISE_FLOOR;

/// Largest integer whose factorial is finite in an `f64`.
const MAX_FACTORIAL: f64 = 170.0;

/// Unit used for trigonometric input (and inverse-trig output).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AngleMode {
    #[default]
    Deg,
    Rad,
}

impl AngleMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Deg => Self::Rad,
            Self::Rad => Self::Deg,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Deg => "DEG",
            Self::Rad => "RAD",
        }
    }

    fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Deg => value * PI / 180.0,
            Self::Rad => value,
        }
    }

    fn from_radians(self, value: f64) -> f64 {
        match self {
            Self::Deg => value * 180.0 / PI,
            Self::Rad => value,
        }
    }
}

/// A function applied to the current value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Sqrt,
    Square,
    Cube,
    Reciprocal,
    Ln,
    Log,
    Exp,
    Abs,
    Factorial,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
}

impl Function {
    pub const ALL: [Function; 15] = [
        Self::Sqrt,
        Self::Square,
        Self::Cube,
        Self::Reciprocal,
        Self::Ln,
        Self::Log,
        Self::Exp,
        Self::Abs,
        Self::Factorial,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
    ];

    /// Name accepted when typing the function.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Square => "square",
            Self::Cube => "cube",
            Self::Reciprocal => "reciprocal",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Exp => "exp",
            Self::Abs => "abs",
            Self::Factorial => "factorial",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
        }
    }

    /// Symbol written into the expression line as `symbol(value)`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Sqrt => "√",
            Self::Square => "sqr",
            Self::Cube => "cube",
            Self::Reciprocal => "1/",
            Self::Factorial => "fact",
            other => other.name(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.to_lowercase();
        match lower.as_str() {
            "√" | "sqrt" => Some(Self::Sqrt),
            "sqr" | "x²" => Some(Self::Square),
            "x³" => Some(Self::Cube),
            "1/x" | "inv" => Some(Self::Reciprocal),
            "n!" | "fact" => Some(Self::Factorial),
            other => Self::ALL.into_iter().find(|f| f.name() == other),
        }
    }

    pub fn is_trig(self) -> bool {
        matches!(
            self,
            Self::Sin | Self::Cos | Self::Tan | Self::Asin | Self::Acos | Self::Atan
        )
    }

    /// Evaluate the function at `value`.
    ///
    /// Trig results smaller than the noise floor become exactly zero, so
    /// `sin(180°)` is `0` rather than `1.2e-16`. The result is not rounded.
    pub fn apply(self, value: f64, angle_mode: AngleMode) -> Result<f64, CalcError> {
        let result = match self {
            Self::Sqrt => {
                if value < 0.0 {
                    return Err(CalcError::NegativeSqrt);
                }
                value.sqrt()
            }
            Self::Square => value * value,
            Self::Cube => value * value * value,
            Self::Reciprocal => {
                if value == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                1.0 / value
            }
            Self::Ln => value.ln(),
            Self::Log => value.log10(),
            Self::Exp => value.exp(),
            Self::Abs => value.abs(),
            Self::Factorial => factorial(value).ok_or(CalcError::domain(self.name()))?,
            Self::Sin => angle_mode.to_radians(value).sin(),
            Self::Cos => angle_mode.to_radians(value).cos(),
            Self::Tan => angle_mode.to_radians(value).tan(),
            Self::Asin => angle_mode.from_radians(value.asin()),
            Self::Acos => angle_mode.from_radians(value.acos()),
            Self::Atan => angle_mode.from_radians(value.atan()),
        };

        let result = if self.is_trig() && result.abs() < NOISE_FLOOR {
            0.0
        } else {
            result
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(CalcError::domain(self.name()))
        }
    }
}

fn factorial(value: f64) -> Option<f64> {
    if value < 0.0 || value.fract() != 0.0 || value > MAX_FACTORIAL {
        return None;
    }
    Some((1..=value as u32).map(f64::from).product())
}

/// Named constants that can replace the current value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Self::Pi => PI,
            Self::E => E,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Pi => "π",
            Self::E => "e",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" | "PI" | "π" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deg(function: Function, value: f64) -> Result<f64, CalcError> {
        function.apply(value, AngleMode::Deg)
    }

    #[test]
    fn test_sin_180_degrees_is_zero() {
        assert_eq!(deg(Function::Sin, 180.0), Ok(0.0));
        assert_eq!(deg(Function::Cos, 90.0), Ok(0.0));
    }

    #[test]
    fn test_trig_in_radians() {
        let result = Function::Sin.apply(PI / 2.0, AngleMode::Rad).unwrap();
        assert!((result - 1.0).abs() < 1e-15);
        assert_eq!(Function::Sin.apply(PI, AngleMode::Rad), Ok(0.0));
    }

    #[test]
    fn test_inverse_trig_returns_degrees() {
        let result = deg(Function::Asin, 1.0).unwrap();
        assert!((result - 90.0).abs() < 1e-12);
        assert_eq!(deg(Function::Acos, 2.0), Err(CalcError::domain("acos")));
    }

    #[test]
    fn test_sqrt() {
        assert_eq!(deg(Function::Sqrt, 16.0), Ok(4.0));
        assert_eq!(deg(Function::Sqrt, -1.0), Err(CalcError::NegativeSqrt));
    }

    #[test]
    fn test_logarithms() {
        let log = deg(Function::Log, 1000.0).unwrap();
        assert!((log - 3.0).abs() < 1e-12);
        assert_eq!(deg(Function::Ln, 0.0), Err(CalcError::domain("ln")));
        assert_eq!(deg(Function::Ln, -2.0), Err(CalcError::domain("ln")));
    }

    #[test]
    fn test_reciprocal_of_zero() {
        assert_eq!(
            deg(Function::Reciprocal, 0.0),
            Err(CalcError::DivisionByZero)
        );
        assert_eq!(deg(Function::Reciprocal, 4.0), Ok(0.25));
    }

    #[test]
    fn test_factorial() {
        assert_eq!(deg(Function::Factorial, 0.0), Ok(1.0));
        assert_eq!(deg(Function::Factorial, 5.0), Ok(120.0));
        assert!(deg(Function::Factorial, 170.0).is_ok());
        assert!(deg(Function::Factorial, 171.0).is_err());
        assert!(deg(Function::Factorial, 2.5).is_err());
        assert!(deg(Function::Factorial, -1.0).is_err());
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Function::from_name("SIN"), Some(Function::Sin));
        assert_eq!(Function::from_name("√"), Some(Function::Sqrt));
        assert_eq!(Function::from_name("1/x"), Some(Function::Reciprocal));
        assert_eq!(Function::from_name("firefox"), None);
    }

    #[test]
    fn test_angle_mode_toggle() {
        assert_eq!(AngleMode::default(), AngleMode::Deg);
        assert_eq!(AngleMode::Deg.toggled(), AngleMode::Rad);
        assert_eq!(AngleMode::Rad.label(), "RAD");
    }
}

//! The single memory register.

/// Memory key actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryOp {
    /// `mc`: zero the register.
    Clear,
    /// `mr`: load the register as the current value.
    Recall,
    /// `ms`: store the current value.
    Store,
    /// `m+`: add the current value.
    Add,
    /// `m-`: subtract the current value.
    Subtract,
}

impl MemoryOp {
    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "mc",
            Self::Recall => "mr",
            Self::Store => "ms",
            Self::Add => "m+",
            Self::Subtract => "m-",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "mc" => Some(Self::Clear),
            "mr" => Some(Self::Recall),
            "ms" => Some(Self::Store),
            "m+" | "m-plus" => Some(Self::Add),
            "m-" | "m-minus" => Some(Self::Subtract),
            _ => None,
        }
    }
}

/// Accumulator that survives `clear`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Memory {
    value: f64,
}

impl Memory {
    pub fn new(value: f64) -> Self {
        Self {
            value: if value.is_finite() { value } else { 0.0 },
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Whether the memory indicator should be lit.
    pub fn is_active(&self) -> bool {
        self.value != 0.0
    }

    pub fn clear(&mut self) {
        self.value = 0.0;
    }

    pub fn store(&mut self, value: f64) {
        self.value = value;
    }

    pub fn add(&mut self, value: f64) {
        self.value += value;
    }

    pub fn subtract(&mut self, value: f64) {
        self.value -= value;
    }
}

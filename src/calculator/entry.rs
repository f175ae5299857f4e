//! The number currently being typed or last produced.

/// Longest input the keypad will accept.
pub const MAX_INPUT_LEN: usize = 15;

/// Text buffer holding a decimal literal.
///
/// The buffer is always a valid literal (it may end in `.`) or `"0"`, so
/// [`Entry::value`] never has to guess. Whether it holds a decimal point is
/// read off the text itself rather than tracked separately.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    text: String,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            text: "0".to_string(),
        }
    }
}

impl Entry {
    /// Build an entry holding a finished value.
    pub fn from_value(value: f64) -> Self {
        if value == 0.0 || !value.is_finite() {
            return Self::default();
        }
        Self {
            text: value.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> f64 {
        self.text.parse().unwrap_or(0.0)
    }

    pub fn has_decimal(&self) -> bool {
        self.text.contains('.')
    }

    pub fn is_zero(&self) -> bool {
        self.text == "0"
    }

    /// Append a digit, replacing a lone `0`.
    ///
    /// Returns `false` when the digit was dropped (out of range or the
    /// buffer is full).
    pub fn push_digit(&mut self, digit: u8) -> bool {
        let Some(c) = char::from_digit(u32::from(digit), 10) else {
            return false;
        };

        if self.is_zero() {
            self.text.clear();
        } else if self.text.len() >= MAX_INPUT_LEN {
            return false;
        }

        self.text.push(c);
        true
    }

    /// Append a decimal point unless one is already present.
    pub fn push_point(&mut self) -> bool {
        if self.has_decimal() || self.text.len() >= MAX_INPUT_LEN {
            return false;
        }
        self.text.push('.');
        true
    }

    /// Remove the last character, falling back to `"0"` when nothing
    /// meaningful remains.
    pub fn pop(&mut self) -> Option<char> {
        let removed = self.text.pop();
        if matches!(self.text.as_str(), "" | "-" | "-0") {
            *self = Self::default();
        }
        removed
    }

    /// Flip the sign in place, keeping the literal form (`"5."` stays
    /// `"-5."`). Zero is never signed.
    pub fn negate(&mut self) {
        if let Some(rest) = self.text.strip_prefix('-') {
            self.text = rest.to_string();
        } else if self.value() != 0.0 {
            self.text.insert(0, '-');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(digits: &[u8]) -> Entry {
        let mut entry = Entry::default();
        for &d in digits {
            entry.push_digit(d);
        }
        entry
    }

    #[test]
    fn test_leading_zero_replaced() {
        assert_eq!(typed(&[0, 0, 7]).as_str(), "7");
        assert_eq!(typed(&[4, 0, 2]).as_str(), "402");
    }

    #[test]
    fn test_length_cap() {
        let digits: Vec<u8> = (0..20).map(|i| (i % 9 + 1) as u8).collect();
        let entry = typed(&digits);
        assert_eq!(entry.as_str().len(), MAX_INPUT_LEN);
        assert_eq!(entry.as_str(), "123456789123456");
    }

    #[test]
    fn test_out_of_range_digit_ignored() {
        let mut entry = typed(&[1]);
        assert!(!entry.push_digit(10));
        assert_eq!(entry.as_str(), "1");
    }

    #[test]
    fn test_single_decimal_point() {
        let mut entry = typed(&[3]);
        assert!(entry.push_point());
        assert!(!entry.push_point());
        entry.push_digit(5);
        assert_eq!(entry.as_str(), "3.5");
        assert!(entry.has_decimal());
    }

    #[test]
    fn test_pop() {
        let mut entry = typed(&[1, 2]);
        entry.push_point();
        assert_eq!(entry.pop(), Some('.'));
        assert!(!entry.has_decimal());
        entry.pop();
        entry.pop();
        assert_eq!(entry.as_str(), "0");
    }

    #[test]
    fn test_pop_negative_single_digit() {
        let mut entry = typed(&[5]);
        entry.negate();
        entry.pop();
        assert_eq!(entry.as_str(), "0");
    }

    #[test]
    fn test_pop_back_to_negative_zero() {
        let mut entry = Entry::default();
        entry.push_point();
        entry.push_digit(5);
        entry.negate();
        assert_eq!(entry.as_str(), "-0.5");

        entry.pop();
        assert_eq!(entry.as_str(), "-0.");
        entry.pop();
        assert_eq!(entry.as_str(), "0");

        entry.push_digit(7);
        assert_eq!(entry.as_str(), "7");
    }

    #[test]
    fn test_negate() {
        let mut entry = typed(&[5]);
        entry.push_point();
        entry.negate();
        assert_eq!(entry.as_str(), "-5.");
        assert_eq!(entry.value(), -5.0);
        entry.negate();
        assert_eq!(entry.as_str(), "5.");

        let mut zero = Entry::default();
        zero.negate();
        assert_eq!(zero.as_str(), "0");
    }

    #[test]
    fn test_from_value() {
        assert_eq!(Entry::from_value(8.0).as_str(), "8");
        assert_eq!(Entry::from_value(-0.25).as_str(), "-0.25");
        assert_eq!(Entry::from_value(-0.0).as_str(), "0");
        assert_eq!(Entry::from_value(1e-7).value(), 1e-7);
    }
}

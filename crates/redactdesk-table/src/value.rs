//! Cell values and locale-aware ordering.

use std::cmp::Ordering;
use std::fmt;

/// A primitive attribute value exposed by a column accessor.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// String attribute.
    Text(String),
    /// Numeric attribute.
    Number(f64),
    /// Boolean attribute.
    Bool(bool),
}

impl Value {
    /// Orders two values the way a column sort does.
    ///
    /// Numbers and booleans compare by value, text compares with
    /// [`locale_cmp`]. Mixed kinds fall back to their string forms.
    /// Numbers follow the IEEE total order, so NaN sorts above every number.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => locale_cmp(a, b),
            _ => locale_cmp(&self.to_string(), &other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)] // Record ids and counts stay well below 2^53
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Compares two strings in a human, locale-like order.
///
/// Primary order ignores case and Latin accents, secondary order ignores
/// case only, and raw code points break any remaining tie. This keeps
/// "apple", "Apple" and "Äpple" adjacent instead of scattering them by
/// byte value.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| {
        s.chars()
            .flat_map(|c| base_letter(c).to_lowercase())
            .collect::<Vec<_>>()
    };
    let lowered = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();

    folded(a)
        .cmp(&folded(b))
        .then_with(|| lowered(a).cmp(&lowered(b)))
        .then_with(|| a.cmp(b))
}

/// Strips the accent from common Latin-1 letters.
const fn base_letter(c: char) -> char {
    match c {
        'À'..='Å' | 'à'..='å' => 'a',
        'Ç' | 'ç' => 'c',
        'È'..='Ë' | 'è'..='ë' => 'e',
        'Ì'..='Ï' | 'ì'..='ï' => 'i',
        'Ñ' | 'ñ' => 'n',
        'Ò'..='Ö' | 'Ø' | 'ò'..='ö' | 'ø' => 'o',
        'Ù'..='Ü' | 'ù'..='ü' => 'u',
        'Ý' | 'ý' | 'ÿ' => 'y',
        _ => c,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
    }

    #[test]
    fn test_locale_cmp_accents_sort_with_base_letter() {
        assert_eq!(locale_cmp("Érable", "Fig"), Ordering::Less);
        assert_eq!(locale_cmp("Érable", "Dune"), Ordering::Greater);
    }

    #[test]
    fn test_locale_cmp_is_total_on_case_variants() {
        assert_ne!(locale_cmp("a", "A"), Ordering::Equal);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_nan_has_a_consistent_position() {
        let nan = Value::Number(f64::NAN);
        let one = Value::Number(1.0);
        assert_eq!(nan.compare(&one), Ordering::Greater);
        assert_eq!(one.compare(&nan), Ordering::Less);
        assert_eq!(nan.compare(&nan), Ordering::Equal);

        let mut values = vec![Value::Number(3.0), nan, Value::Number(-2.0), one];
        values.sort_by(Value::compare);
        assert_eq!(
            values[..3],
            [Value::Number(-2.0), Value::Number(1.0), Value::Number(3.0)]
        );
        assert!(matches!(values[3], Value::Number(n) if n.is_nan()));
    }

    #[test]
    fn test_numbers_compare_numerically() {
        assert_eq!(Value::from(9_i64).compare(&Value::from(10_i64)), Ordering::Less);
        assert_eq!(
            Value::from("9").compare(&Value::from("10")),
            Ordering::Greater
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from(42_i64).to_string(), "42");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from("x").to_string(), "x");
    }
}

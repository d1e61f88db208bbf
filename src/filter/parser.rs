use super::error::FilterParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Comparison operators understood by filter expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// `=`, also used when no operator prefix is present
    Eq,
    /// `!=` or `!`
    Ne,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Ge => ">=",
            Operator::Le => "<=",
            Operator::Eq => "=",
            Operator::Ne => "!=",
        }
    }

    /// Compare `item` against `target`. Equality is exact, no epsilon.
    pub fn apply(&self, item: f64, target: f64) -> bool {
        match self {
            Operator::Gt => item > target,
            Operator::Lt => item < target,
            Operator::Ge => item >= target,
            Operator::Le => item <= target,
            Operator::Eq => item == target,
            Operator::Ne => item != target,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ">" => Ok(Operator::Gt),
            "<" => Ok(Operator::Lt),
            ">=" => Ok(Operator::Ge),
            "<=" => Ok(Operator::Le),
            "=" | "==" => Ok(Operator::Eq),
            "!=" | "!" => Ok(Operator::Ne),
            other => Err(FilterParseError::UnknownOperator(other.to_string())),
        }
    }
}

/// Order in which operator prefixes are tried
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precedence {
    /// `!=` is tried before `!`, so `!=5` means "not equal to 5".
    #[default]
    Standard,
    /// `!` is tried before `!=`. `!=5` leaves `=5`, which is not a number,
    /// so such a filter never matches.
    Legacy,
}

const STANDARD_RULES: &[(&str, Operator)] = &[
    (">=", Operator::Ge),
    ("<=", Operator::Le),
    (">", Operator::Gt),
    ("<", Operator::Lt),
    ("=", Operator::Eq),
    ("!=", Operator::Ne),
    ("!", Operator::Ne),
];

const LEGACY_RULES: &[(&str, Operator)] = &[
    (">=", Operator::Ge),
    ("<=", Operator::Le),
    (">", Operator::Gt),
    ("<", Operator::Lt),
    ("=", Operator::Eq),
    ("!", Operator::Ne),
    ("!=", Operator::Ne),
];

impl Precedence {
    fn prefix_rules(&self) -> &'static [(&'static str, Operator)] {
        match self {
            Precedence::Standard => STANDARD_RULES,
            Precedence::Legacy => LEGACY_RULES,
        }
    }
}

/// Split a normalized expression into its operator and the remaining value text
///
/// The first matching prefix wins; with no prefix the operator is `=` and the
/// whole text is the value.
pub fn split_operator(text: &str, precedence: Precedence) -> (Operator, &str) {
    precedence
        .prefix_rules()
        .iter()
        .find_map(|(prefix, op)| text.strip_prefix(prefix).map(|rest| (*op, rest)))
        .unwrap_or((Operator::Eq, text))
}

/// A parsed filter: operator plus numeric threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub operator: Operator,
    pub threshold: f64,
}

impl Criterion {
    /// Parse a filter expression such as `>=10`, `!3` or `5`.
    ///
    /// Only a completely empty string is rejected as [`FilterParseError::Empty`];
    /// whitespace-only input trims down to an empty value, which reads as `0`.
    pub fn parse(text: &str, precedence: Precedence) -> Result<Self, FilterParseError> {
        if text.is_empty() {
            return Err(FilterParseError::Empty);
        }

        let normalized = text.trim();
        let (operator, value) = split_operator(normalized, precedence);
        let threshold = parse_number(value)
            .filter(|v| !v.is_nan())
            .ok_or_else(|| FilterParseError::InvalidThreshold(value.to_string()))?;

        Ok(Criterion {
            operator,
            threshold,
        })
    }

    pub fn matches(&self, candidate: impl NumericValue) -> bool {
        self.operator.apply(coerce_candidate(candidate), self.threshold)
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.operator, self.threshold)
    }
}

/// Parse text as a number the way a browser's loose number conversion does
///
/// Surrounding whitespace is ignored and empty text is `0`. Accepts an
/// optional sign, decimal and exponent forms, `Infinity`, and unsigned
/// `0x`/`0o`/`0b` integer literals. Everything else is not a number.
pub fn parse_number(text: &str) -> Option<f64> {
    let s = text.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    if let Some(value) = parse_radix_literal(s) {
        return Some(value);
    }

    let (sign, unsigned) = match s.as_bytes()[0] {
        b'+' => (1.0, &s[1..]),
        b'-' => (-1.0, &s[1..]),
        _ => (1.0, s),
    };

    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }

    // Rust accepts "inf" and "nan" spellings that the browser does not
    if !unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }

    unsigned.parse::<f64>().ok().map(|v| sign * v)
}

fn parse_radix_literal(s: &str) -> Option<f64> {
    let radix = match s.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };

    let digits = &s[2..];
    if digits.is_empty() {
        return None;
    }

    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    })
}

/// Anything a row can hold in a numeric column
pub trait NumericValue {
    /// The numeric reading of the value, `None` when it has none.
    fn to_number(&self) -> Option<f64>;
}

macro_rules! impl_numeric_value {
    ($($t:ty),*) => {
        $(
            impl NumericValue for $t {
                fn to_number(&self) -> Option<f64> {
                    Some(*self as f64)
                }
            }
        )*
    };
}

impl_numeric_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl NumericValue for bool {
    fn to_number(&self) -> Option<f64> {
        Some(if *self { 1.0 } else { 0.0 })
    }
}

impl NumericValue for str {
    fn to_number(&self) -> Option<f64> {
        parse_number(self)
    }
}

impl NumericValue for String {
    fn to_number(&self) -> Option<f64> {
        parse_number(self)
    }
}

impl<T: NumericValue> NumericValue for Option<T> {
    fn to_number(&self) -> Option<f64> {
        self.as_ref().and_then(NumericValue::to_number)
    }
}

impl<T: NumericValue + ?Sized> NumericValue for &T {
    fn to_number(&self) -> Option<f64> {
        (**self).to_number()
    }
}

/// JSON values read like browser number conversion: an empty array is `0`,
/// a one-element array reads through its element, anything longer is not a
/// number.
impl NumericValue for serde_json::Value {
    fn to_number(&self) -> Option<f64> {
        match self {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => parse_number(s),
            serde_json::Value::Bool(b) => b.to_number(),
            serde_json::Value::Array(items) => match items.as_slice() {
                [] | [serde_json::Value::Null] => Some(0.0),
                // a lone boolean is stringified first, "true" is not a number
                [serde_json::Value::Bool(_)] => None,
                [item] => item.to_number(),
                _ => None,
            },
            serde_json::Value::Null | serde_json::Value::Object(_) => None,
        }
    }
}

/// Numeric reading of a candidate, `0` when it is not a number
pub fn coerce_candidate(candidate: impl NumericValue) -> f64 {
    candidate
        .to_number()
        .filter(|v| !v.is_nan())
        .unwrap_or(0.0)
}

//! Special value (sentinel) definitions
//!
//! The container reserves five floating point codes for values that have no
//! ordinary numeric meaning. The host side represents them as:
//!
//! | index | meaning        | host value          |
//! |-------|----------------|---------------------|
//! | 0     | undefined      | `None`              |
//! | 1     | not available  | `Some(NaN)`         |
//! | 2     | +infinity      | `Some(f64::INFINITY)` |
//! | 3     | -infinity      | `Some(f64::NEG_INFINITY)` |
//! | 4     | epsilon        | `Some(f64::EPSILON)` |
//!
//! Host code usually cannot tell undefined from not-available, so the two
//! compare equal through [`host_values_equal`] and
//! [`SpecialValues::binary_equal`].

use super::constants::{sentinel, SPECIAL_VALUE_COUNT};
use crate::{FormatError, Result};

/// Host representation of epsilon
pub const HOST_EPSILON: f64 = f64::EPSILON;

/// One of the five reserved values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SpecialValue {
    Undefined = 0,
    NotAvailable = 1,
    PositiveInfinity = 2,
    NegativeInfinity = 3,
    Epsilon = 4,
}

impl SpecialValue {
    /// All special values in table order
    pub const ALL: [SpecialValue; SPECIAL_VALUE_COUNT] = [
        SpecialValue::Undefined,
        SpecialValue::NotAvailable,
        SpecialValue::PositiveInfinity,
        SpecialValue::NegativeInfinity,
        SpecialValue::Epsilon,
    ];

    /// Convert from a table index
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(SpecialValue::Undefined),
            1 => Some(SpecialValue::NotAvailable),
            2 => Some(SpecialValue::PositiveInfinity),
            3 => Some(SpecialValue::NegativeInfinity),
            4 => Some(SpecialValue::Epsilon),
            _ => None,
        }
    }

    /// Position in the sentinel table
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Host value this sentinel maps to
    pub const fn host_value(self) -> Option<f64> {
        match self {
            SpecialValue::Undefined => None,
            SpecialValue::NotAvailable => Some(f64::NAN),
            SpecialValue::PositiveInfinity => Some(f64::INFINITY),
            SpecialValue::NegativeInfinity => Some(f64::NEG_INFINITY),
            SpecialValue::Epsilon => Some(HOST_EPSILON),
        }
    }
}

impl core::fmt::Display for SpecialValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SpecialValue::Undefined => write!(f, "UNDF"),
            SpecialValue::NotAvailable => write!(f, "NA"),
            SpecialValue::PositiveInfinity => write!(f, "+INF"),
            SpecialValue::NegativeInfinity => write!(f, "-INF"),
            SpecialValue::Epsilon => write!(f, "EPS"),
        }
    }
}

fn abs(x: f64) -> f64 {
    if x < 0.0 {
        -x
    } else {
        x
    }
}

/// Tolerant epsilon test: `|x - eps| < eps`
///
/// Epsilon does not always survive exact round trips, so an exact comparison
/// would miss values that are meant to be epsilon.
pub fn is_epsilon(x: f64) -> bool {
    abs(x - HOST_EPSILON) < HOST_EPSILON
}

/// Whether a host value is one of the special values
pub fn is_special(value: Option<f64>) -> bool {
    match value {
        None => true,
        Some(x) => x.is_nan() || x.is_infinite() || is_epsilon(x),
    }
}

/// NaN-aware equality on host values
///
/// `None` and NaN are interchangeable; everything else compares with `==`.
pub fn host_values_equal(a: Option<f64>, b: Option<f64>) -> bool {
    let a_missing = a.map_or(true, f64::is_nan);
    let b_missing = b.map_or(true, f64::is_nan);
    match (a, b) {
        _ if a_missing || b_missing => a_missing && b_missing,
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// The container's sentinel codes, in [`SpecialValue`] order
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialValues {
    codes: [f64; SPECIAL_VALUE_COUNT],
}

impl SpecialValues {
    /// Table with the standard container codes
    pub const fn new() -> Self {
        Self {
            codes: sentinel::DEFAULT_TABLE,
        }
    }

    /// Build a table from codes reported by a codec
    ///
    /// Codes must be pairwise distinct and not NaN, otherwise translation
    /// would be ambiguous.
    pub fn from_codes(codes: [f64; SPECIAL_VALUE_COUNT]) -> Result<Self> {
        for (i, a) in codes.iter().enumerate() {
            if a.is_nan() {
                return Err(FormatError::InvalidSentinelTable);
            }
            if codes[i + 1..].iter().any(|b| a == b) {
                return Err(FormatError::InvalidSentinelTable);
            }
        }
        Ok(Self { codes })
    }

    /// Raw codes in table order
    pub const fn codes(&self) -> [f64; SPECIAL_VALUE_COUNT] {
        self.codes
    }

    /// Code used for a special value
    pub const fn code(&self, value: SpecialValue) -> f64 {
        self.codes[value.index()]
    }

    /// Identify a raw container value as a special value
    pub fn classify(&self, raw: f64) -> Option<SpecialValue> {
        self.codes
            .iter()
            .position(|&code| code == raw)
            .and_then(SpecialValue::from_index)
    }

    /// Container value to host value
    pub fn to_host(&self, raw: f64) -> Option<f64> {
        match self.classify(raw) {
            Some(special) => special.host_value(),
            None => Some(raw),
        }
    }

    /// Host value to container value
    pub fn to_binary(&self, host: Option<f64>) -> f64 {
        let special = match host {
            None => SpecialValue::Undefined,
            Some(x) if x.is_nan() => SpecialValue::NotAvailable,
            Some(x) if x == f64::INFINITY => SpecialValue::PositiveInfinity,
            Some(x) if x == f64::NEG_INFINITY => SpecialValue::NegativeInfinity,
            Some(x) if is_epsilon(x) => SpecialValue::Epsilon,
            Some(x) => return x,
        };
        self.code(special)
    }

    /// Equality on container values with undefined and not-available merged
    pub fn binary_equal(&self, a: f64, b: f64) -> bool {
        let missing = |x: f64| {
            matches!(
                self.classify(x),
                Some(SpecialValue::Undefined | SpecialValue::NotAvailable)
            )
        };
        if missing(a) || missing(b) {
            return missing(a) && missing(b);
        }
        a == b
    }

    /// Re-express a value written under another table in this table's codes
    pub fn remap_from(&self, raw: f64, other: &SpecialValues) -> f64 {
        match other.classify(raw) {
            Some(special) => self.code(special),
            None => raw,
        }
    }
}

impl Default for SpecialValues {
    fn default() -> Self {
        Self::new()
    }
}

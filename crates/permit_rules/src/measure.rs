//! Numeric input values that keep their integer/float spelling.
//!
//! Violation messages echo the submitted values back to the applicant, so a
//! value supplied as `3` must print as `3` and a value supplied as `3.0` must
//! print as `3.0`. Arithmetic between two integers stays integral; any float
//! operand promotes the result to a float.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A measurement as it appeared in the submission.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Int(i64),
    Float(f64),
}

impl Measure {
    pub const ZERO: Measure = Measure::Int(0);

    pub fn as_f64(self) -> f64 {
        match self {
            Measure::Int(v) => v as f64,
            Measure::Float(v) => v,
        }
    }

    pub fn is_zero(self) -> bool {
        self.as_f64() == 0.0
    }

    pub fn abs(self) -> Measure {
        match self {
            Measure::Int(v) => Measure::Int(v.saturating_abs()),
            Measure::Float(v) => Measure::Float(v.abs()),
        }
    }

    /// The larger of two measures; the first wins ties.
    pub fn max(self, other: Measure) -> Measure {
        if other > self {
            other
        } else {
            self
        }
    }

    /// The smaller of two measures; the first wins ties.
    pub fn min(self, other: Measure) -> Measure {
        if other < self {
            other
        } else {
            self
        }
    }
}

impl Default for Measure {
    fn default() -> Self {
        Measure::ZERO
    }
}

impl From<i64> for Measure {
    fn from(value: i64) -> Self {
        Measure::Int(value)
    }
}

impl From<f64> for Measure {
    fn from(value: f64) -> Self {
        Measure::Float(value)
    }
}

impl From<Measure> for Value {
    fn from(value: Measure) -> Self {
        match value {
            Measure::Int(v) => Value::from(v),
            Measure::Float(v) => Value::from(v),
        }
    }
}

impl PartialEq for Measure {
    fn eq(&self, other: &Self) -> bool {
        self.as_f64() == other.as_f64()
    }
}

impl PartialOrd for Measure {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.as_f64().partial_cmp(&other.as_f64())
    }
}

macro_rules! measure_op {
    ($trait:ident, $method:ident, $checked:ident, $op:tt) => {
        impl $trait for Measure {
            type Output = Measure;

            fn $method(self, rhs: Measure) -> Measure {
                match (self, rhs) {
                    (Measure::Int(a), Measure::Int(b)) => match a.$checked(b) {
                        Some(v) => Measure::Int(v),
                        None => Measure::Float(a as f64 $op b as f64),
                    },
                    (a, b) => Measure::Float(a.as_f64() $op b.as_f64()),
                }
            }
        }
    };
}

measure_op!(Add, add, checked_add, +);
measure_op!(Sub, sub, checked_sub, -);
measure_op!(Mul, mul, checked_mul, *);

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Measure::Int(v) => write!(f, "{v}"),
            Measure::Float(v) => write_float(f, v),
        }
    }
}

/// Shortest round-trip spelling, always carrying a fractional part or an
/// exponent so floats never read as integers.
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("nan");
    }
    if v.is_infinite() {
        return f.write_str(if v > 0.0 { "inf" } else { "-inf" });
    }
    let magnitude = v.abs();
    if magnitude >= 1e16 || (magnitude != 0.0 && magnitude < 1e-4) {
        let raw = format!("{v:e}");
        let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let sign = if exponent < 0 { '-' } else { '+' };
        return write!(f, "{mantissa}e{sign}{:02}", exponent.abs());
    }
    if v.fract() == 0.0 {
        write!(f, "{v:.1}")
    } else {
        write!(f, "{v}")
    }
}

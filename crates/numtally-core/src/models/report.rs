//! Aggregate and report data models.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::extract::NumericToken;

/// Count and sum over every successfully parsed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    /// Number of values.
    pub count: usize,
    /// Sum, accumulated left to right.
    pub sum: f64,
    /// True when every value has a zero fractional part.
    pub all_integral: bool,
}

impl Aggregate {
    /// Aggregate values in order. Returns `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self {
            count: values.len(),
            sum: values.iter().fold(0.0, |acc, v| acc + v),
            all_integral: values.iter().all(|v| is_integral(*v)),
        })
    }

    /// How the sum should be shown.
    pub fn display(&self) -> SumDisplay {
        if self.all_integral {
            SumDisplay::Integer(self.sum.trunc())
        } else {
            SumDisplay::Float(self.sum)
        }
    }
}

fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0
}

/// Display form of a sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SumDisplay {
    /// Rendered without a decimal point.
    Integer(f64),
    /// Rendered as the shortest round-trip float, in exponent form when very
    /// small or very large.
    Float(f64),
}

impl SumDisplay {
    pub fn kind(&self) -> &'static str {
        match self {
            SumDisplay::Integer(_) => "integer",
            SumDisplay::Float(_) => "float",
        }
    }
}

impl fmt::Display for SumDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SumDisplay::Integer(v) => write!(f, "{:.0}", v),
            SumDisplay::Float(v) => write_float(f, *v),
        }
    }
}

/// Shortest round-trip form. Magnitudes below 1e-4 or from 1e16 up switch to
/// exponent notation with a signed, at least two digit exponent (`1e-05`).
fn write_float(f: &mut fmt::Formatter<'_>, v: f64) -> fmt::Result {
    if v.is_nan() {
        return f.write_str("nan");
    }
    if v.is_infinite() {
        return write!(f, "{}", v);
    }
    let abs = v.abs();
    if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
        let sci = format!("{:e}", v);
        let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        let exp: i32 = exp.parse().unwrap_or(0);
        let sign = if exp < 0 { '-' } else { '+' };
        return write!(f, "{}e{}{:02}", mantissa, sign, exp.abs());
    }
    if v.fract() == 0.0 {
        write!(f, "{:.1}", v)
    } else {
        write!(f, "{}", v)
    }
}

impl Serialize for SumDisplay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What extraction produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No numeric tokens were found.
    Empty,
    /// Tokens in order of appearance and their aggregate.
    Found {
        tokens: Vec<NumericToken>,
        aggregate: Aggregate,
    },
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Short name of the resource, e.g. `script.js`.
    pub resource: String,
    /// Leading characters of the fetched text.
    pub preview: String,
    /// Number of characters the preview was cut to.
    pub preview_chars: usize,
    pub outcome: Outcome,
}

impl Report {
    pub fn aggregate(&self) -> Option<&Aggregate> {
        match &self.outcome {
            Outcome::Found { aggregate, .. } => Some(aggregate),
            Outcome::Empty => None,
        }
    }

    pub fn tokens(&self) -> &[NumericToken] {
        match &self.outcome {
            Outcome::Found { tokens, .. } => tokens,
            Outcome::Empty => &[],
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.tokens().iter().map(|t| t.value).collect()
    }
}

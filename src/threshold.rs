//! Compare a metric against warning and critical bounds

use std::fmt;

use crate::zookeeper::MetricValue;
use crate::Status;

/// The final status of a check and the line to report with it
#[derive(Debug, Clone, PartialEq)]
pub struct CheckResult {
    pub status: Status,
    pub message: String,
}

impl CheckResult {
    pub fn new<S: Into<String>>(status: Status, message: S) -> CheckResult {
        CheckResult {
            status,
            message: message.into(),
        }
    }

    pub fn ok<S: Into<String>>(message: S) -> CheckResult {
        CheckResult::new(Status::Ok, message)
    }

    pub fn unknown<S: Into<String>>(message: S) -> CheckResult {
        CheckResult::new(Status::Unknown, message)
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

/// Optional bounds, any of which may be unset
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub mincrit: Option<f64>,
    pub maxcrit: Option<f64>,
    pub minwarn: Option<f64>,
    pub maxwarn: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
enum Bound {
    Below(f64),
    Above(f64),
}

impl Bound {
    fn violated_by(self, value: f64) -> bool {
        match self {
            Bound::Below(min) => value < min,
            Bound::Above(max) => value > max,
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Bound::Below(min) => write!(f, "less than {}", format_float(min)),
            Bound::Above(max) => write!(f, "exceeds {}", format_float(max)),
        }
    }
}

impl Thresholds {
    /// Check `value` against every configured bound
    ///
    /// Bounds are tried in the order mincrit, maxcrit, minwarn, maxwarn and
    /// the first violated one decides the result, so critical always wins
    /// over warning.
    pub fn evaluate(&self, metric: &str, value: &MetricValue) -> CheckResult {
        let bounds = [
            (Status::Critical, self.mincrit.map(Bound::Below)),
            (Status::Critical, self.maxcrit.map(Bound::Above)),
            (Status::Warning, self.minwarn.map(Bound::Below)),
            (Status::Warning, self.maxwarn.map(Bound::Above)),
        ];
        for &(status, bound) in bounds.iter() {
            if let Some(bound) = bound {
                if bound.violated_by(value.value) {
                    return CheckResult::new(status, format!("{} {} {}", metric, value.raw, bound));
                }
            }
        }
        CheckResult::ok(format!("{}: {}", metric, format_float(value.value)))
    }
}

/// Print a float the way thresholds are conventionally written
///
/// Always at least one decimal (`2.0`, `2.5`). Values of 1e16 and up, or
/// below 1e-4, switch to exponent form with a two-digit exponent: `1.0e+20`,
/// `1.0e-05`.
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_owned();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    // shortest round-tripping digits, e.g. "1.5e-5"
    let sci = format!("{:e}", v);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => (mantissa, exponent),
            Err(_) => return sci,
        },
        None => return sci,
    };

    if v == 0.0 || (-4..16).contains(&exponent) {
        let fixed = format!("{}", v);
        if fixed.contains('.') {
            fixed
        } else {
            format!("{}.0", fixed)
        }
    } else if mantissa.contains('.') {
        format!("{}e{:+03}", mantissa, exponent)
    } else {
        format!("{}.0e{:+03}", mantissa, exponent)
    }
}

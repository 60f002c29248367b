//!
//! Path length with an explicit "no path" sentinel
//!
//! ```text
//! INF + d   = INF
//! min(INF, d) = d
//! ```
//!
use approx::AbsDiffEq;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::cmp::Ordering;
use std::str::FromStr;
use thiserror::Error;

///
/// Wrapper of f64 that represents the length of a path.
///
/// * never NaN (`Dist::new` rejects it)
/// * `-0.0` is stored as `0.0`, so `Ord` agrees with `PartialEq`
/// * `Dist::INFINITY` means "no path"
///
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, SerializeDisplay, DeserializeFromStr)]
pub struct Dist(f64);

impl Dist {
    ///
    /// "no path" sentinel
    ///
    pub const INFINITY: Dist = Dist(f64::INFINITY);
    ///
    /// distance of a node to itself
    ///
    pub const ZERO: Dist = Dist(0.0);

    ///
    /// Panics if `value` is NaN. Use `Dist::try_new` for untrusted values.
    ///
    pub fn new(value: f64) -> Dist {
        match Dist::try_new(value) {
            Some(d) => d,
            None => panic!("Dist has NaN"),
        }
    }
    ///
    /// `None` if `value` is NaN
    ///
    pub fn try_new(value: f64) -> Option<Dist> {
        if value.is_nan() {
            None
        } else {
            // normalize -0.0
            Some(Dist(value + 0.0))
        }
    }
    pub fn to_value(self) -> f64 {
        self.0
    }
    ///
    /// Is this the "no path" sentinel?
    ///
    pub fn is_infinite(self) -> bool {
        self.0 == f64::INFINITY
    }
    pub fn is_finite(self) -> bool {
        !self.is_infinite()
    }
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

/// Concatenation of two paths `a + b`
///
/// The sentinel is absorbing. A sum of two finite values that overflows
/// becomes `INFINITY` as well, so it can never win a minimum against a
/// reachable pair.
impl std::ops::Add for Dist {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        if self.is_infinite() || other.is_infinite() {
            Dist::INFINITY
        } else {
            Dist(self.0 + other.0)
        }
    }
}

impl Eq for Dist {}
impl Ord for Dist {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

// display
impl std::fmt::Display for Dist {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_infinite() {
            write!(f, "inf")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseDistError {
    #[error("{0}")]
    Float(#[from] std::num::ParseFloatError),
    #[error("NaN is not a distance")]
    NotANumber,
}

/// Accepts anything `f64::from_str` does (including `inf`) except NaN.
impl FromStr for Dist {
    type Err = ParseDistError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.parse()?;
        Dist::try_new(value).ok_or(ParseDistError::NotANumber)
    }
}

/// for approx `assert_abs_diff_eq`
impl AbsDiffEq for Dist {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        if self.is_infinite() || other.is_infinite() {
            self.is_infinite() == other.is_infinite()
        } else {
            f64::abs_diff_eq(&self.0, &other.0, epsilon)
        }
    }
}

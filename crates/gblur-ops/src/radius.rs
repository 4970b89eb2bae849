//! Validated blur radius.
//!
//! The radius reaches the library from untrusted places (a CLI flag, a
//! number typed into a form), so it is checked once at the boundary and
//! carried as a [`Radius`] afterwards. Kernel construction takes a
//! `Radius` and therefore never sees zero, negative, fractional or NaN
//! values.
//!
//! # Example
//!
//! ```rust
//! use gblur_ops::Radius;
//!
//! let r: Radius = "3".parse().unwrap();
//! assert_eq!(r.get(), 3);
//!
//! assert!(Radius::new(0).is_err());
//! assert!(Radius::try_from(2.5f64).is_err());
//! assert!(Radius::try_from(f64::NAN).is_err());
//! ```

use crate::{OpsError, OpsResult};
use std::fmt;
use std::str::FromStr;

/// A positive blur radius in pixels, at most [`Radius::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Radius(u32);

impl Radius {
    /// Largest accepted radius. Bounds the `(2r+1)^2` kernel allocation.
    pub const MAX: u32 = 4096;

    /// Validates a signed integer radius.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidParameter`] if `radius < 1` or `radius > Radius::MAX`.
    pub fn new(radius: i64) -> OpsResult<Self> {
        if radius < 1 {
            return Err(OpsError::InvalidParameter(format!(
                "radius must be >= 1, got {radius}"
            )));
        }
        if radius > Self::MAX as i64 {
            return Err(OpsError::InvalidParameter(format!(
                "radius must be <= {}, got {radius}",
                Self::MAX
            )));
        }
        Ok(Self(radius as u32))
    }

    /// Returns the radius as an integer.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns the radius as a `usize` for indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// Kernel side length, `2 * radius + 1`.
    #[inline]
    pub fn side(self) -> usize {
        2 * self.as_usize() + 1
    }
}

impl TryFrom<i64> for Radius {
    type Error = OpsError;

    fn try_from(radius: i64) -> OpsResult<Self> {
        Self::new(radius)
    }
}

impl TryFrom<i32> for Radius {
    type Error = OpsError;

    fn try_from(radius: i32) -> OpsResult<Self> {
        Self::new(radius as i64)
    }
}

impl TryFrom<u32> for Radius {
    type Error = OpsError;

    fn try_from(radius: u32) -> OpsResult<Self> {
        Self::new(radius as i64)
    }
}

impl TryFrom<f64> for Radius {
    type Error = OpsError;

    /// Accepts only finite, integral values.
    fn try_from(radius: f64) -> OpsResult<Self> {
        if radius.is_nan() {
            return Err(OpsError::InvalidParameter("radius is not a number".into()));
        }
        if !radius.is_finite() || radius.fract() != 0.0 {
            return Err(OpsError::InvalidParameter(format!(
                "radius must be an integer, got {radius}"
            )));
        }
        if radius < 1.0 || radius > Self::MAX as f64 {
            return Err(OpsError::InvalidParameter(format!(
                "radius must be in 1..={}, got {radius}",
                Self::MAX
            )));
        }
        Ok(Self(radius as u32))
    }
}

impl FromStr for Radius {
    type Err = OpsError;

    fn from_str(s: &str) -> OpsResult<Self> {
        let s = s.trim();
        match s.parse::<i64>() {
            Ok(v) => Self::new(v),
            Err(_) => match s.parse::<f64>() {
                // "2.0" is fine, "2.5" and "NaN" are rejected by the f64 rules
                Ok(v) => Self::try_from(v),
                Err(_) => Err(OpsError::InvalidParameter(format!(
                    "radius is not a number: {s:?}"
                ))),
            },
        }
    }
}

impl fmt::Display for Radius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Radius> for u32 {
    fn from(r: Radius) -> u32 {
        r.0
    }
}
